//! Publishing metadata derived from a script.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Days, Local, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::pillar::{self, BABY_NAME, PillarKind};
use crate::script::Script;

const MAX_TITLE_LENGTH: usize = 60;
const MIN_TITLE_LENGTH: usize = 10;
const MAX_DESCRIPTION_LENGTH: usize = 5000;
const MAX_TAGS_LENGTH: usize = 500;

const EMOTIONAL_WORDS: [&str; 5] = ["Amazing", "Adorable", "Heartwarming", "Incredible", "Wonderful"];

const DESCRIPTION_HASHTAGS: [&str; 7] = [
  "#MissGracyBaby",
  "#BabyContent",
  "#Parenting",
  "#BabyLife",
  "#ParentingJourney",
  "#BabyAdventures",
  "#FamilyFun",
];

const CHANNEL_TAGS: [&str; 7] = [
  "Miss Gracy Baby",
  "baby channel",
  "parenting channel",
  "family vlog",
  "baby development",
  "infant activities",
  "toddler play",
];

const STOP_WORDS: [&str; 24] = [
  "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
  "our", "out", "day", "get", "has", "him", "his", "how", "its", "this", "that",
];

const CALL_TO_ACTION: &str = "💕 If you enjoyed this video, please:\n\
  👍 LIKE this video\n\
  🔔 SUBSCRIBE for more baby adventures\n\
  💬 COMMENT below with your thoughts\n\
  📤 SHARE with other parents\n\n\
  New videos every week!";

const PUBLISH_HOUR: u32 = 10;

/// Metadata attached to an uploaded video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
  pub title: String,
  pub description: String,
  pub tags: Vec<String>,
  pub category: String,
  #[serde(default)]
  pub custom_thumbnail: String,
  pub publish_time: NaiveDateTime,
  pub playlist: String,
  pub language: String,
  pub subtitles: bool,
  pub comments_enabled: bool,
  pub age_restriction: String,
  pub generated_at: DateTime<Local>,
}

/// Source of publishing metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
  async fn generate_metadata(&self, script: &Script) -> Result<VideoMetadata, ProviderError>;
}

/// Derives titles, descriptions and tags from the script text.
pub struct TemplateMetadataGenerator {
  rng: Mutex<StdRng>,
  disallowed: Regex,
  year: Option<i32>,
}

impl TemplateMetadataGenerator {
  pub fn new() -> Result<Self, ProviderError> {
    Self::with_rng(StdRng::from_os_rng())
  }

  pub fn with_seed(seed: u64) -> Result<Self, ProviderError> {
    Self::with_rng(StdRng::seed_from_u64(seed))
  }

  fn with_rng(rng: StdRng) -> Result<Self, ProviderError> {
    Ok(Self {
      rng: Mutex::new(rng),
      disallowed: Regex::new(r"[^a-zA-Z0-9\s!?.\-:']")?,
      year: None,
    })
  }

  /// Pin the year stamped into titles.
  pub fn with_year(mut self, year: i32) -> Self {
    self.year = Some(year);
    self
  }

  fn clean(&self, text: &str) -> String {
    self.disallowed.replace_all(text, "").trim().to_string()
  }

  fn emotional_word(&self) -> &'static str {
    let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    EMOTIONAL_WORDS[rng.random_range(0..EMOTIONAL_WORDS.len())]
  }

  /// Title from the opening line of the hook, optimized for search.
  pub fn title(&self, script: &Script) -> String {
    let opening = script
      .script
      .hook
      .as_ref()
      .or(script.script.setup.as_ref())
      .map(|section| first_sentence(&section.content))
      .unwrap_or_default();

    let cleaned = self.clean(opening);
    let title = if cleaned.is_empty() {
      format!("Amazing {} with {BABY_NAME}!", pillar_label(script))
    } else {
      cleaned
    };

    self.optimize_title(title)
  }

  fn optimize_title(&self, mut title: String) -> String {
    let lower = title.to_lowercase();
    if !lower.contains("baby") && !lower.contains("gracy") {
      title = format!("Baby {title}");
    }

    let lower = title.to_lowercase();
    if !EMOTIONAL_WORDS.iter().any(|w| lower.contains(&w.to_lowercase())) {
      title = format!("{} {title}", self.emotional_word());
    }

    if !title.contains("202") {
      let year = self.year.unwrap_or_else(|| Local::now().year());
      title = format!("{title} ({year})");
    }

    let length = title.chars().count();
    if length > MAX_TITLE_LENGTH {
      let truncated: String = title.chars().take(MAX_TITLE_LENGTH - 3).collect();
      title = format!("{truncated}...");
    } else if length < MIN_TITLE_LENGTH {
      title = format!("{BABY_NAME}'s {title}");
    }

    title
  }

  /// Multi-part description capped at the platform limit.
  pub fn description(&self, script: &Script) -> String {
    let body = &script.script;
    let kind = PillarKind::classify(&script.metadata.pillar);
    let mut sections = Vec::new();

    if let Some(hook) = &body.hook {
      let header = self.clean(&hook.content);
      if !header.is_empty() {
        sections.push(header);
      }
    }

    let mut main = Vec::new();
    if let Some(content) = &body.main_content {
      let summary: String = content.content.chars().take(200).collect();
      main.push(format!("In this video: {summary}..."));
    }
    if let Some(educational) = &body.educational_element {
      main.push(format!("Did you know? {}", educational.content));
    }
    main.push(format!("This video is part of our {} series, where we:", pillar_label(script)));
    for bullet in [
      "• Share authentic baby moments",
      "• Provide helpful parenting insights",
      "• Create lasting family memories",
    ] {
      main.push(bullet.to_string());
    }
    sections.push(main.join("\n"));

    let key_points = kind.map(|k| k.key_points()).unwrap_or(&[
      "🌟 Authentic baby moments",
      "💡 Helpful parenting insights",
    ]);
    sections.push(format!("KEY POINTS:\n{}", key_points.join("\n")));

    sections.push(CALL_TO_ACTION.to_string());
    sections.push(description_hashtags(kind).join(" "));

    let description = sections.join("\n\n");
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
      let truncated: String = description.chars().take(MAX_DESCRIPTION_LENGTH - 3).collect();
      format!("{truncated}...")
    } else {
      description
    }
  }

  /// Search tags, de-duplicated, within the platform's combined length limit.
  pub fn tags(&self, script: &Script) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    if let Some(kind) = PillarKind::classify(&script.metadata.pillar) {
      let seo = kind.seo_keywords();
      candidates.extend(seo.primary.iter().map(|k| k.to_string()));
      candidates.extend(seo.secondary.iter().map(|k| k.to_string()));
    }
    candidates.extend(content_keywords(&script.script.full_text()));
    candidates.extend(CHANNEL_TAGS.iter().map(|t| t.to_string()));

    let mut seen = HashSet::new();
    let mut total = 0;
    let mut tags = Vec::new();
    for tag in candidates {
      if !seen.insert(tag.to_lowercase()) {
        continue;
      }
      let cost = tag.chars().count() + 2;
      if total + cost > MAX_TAGS_LENGTH {
        continue;
      }
      total += cost;
      tags.push(tag);
    }
    tags
  }
}

#[async_trait]
impl MetadataProvider for TemplateMetadataGenerator {
  async fn generate_metadata(&self, script: &Script) -> Result<VideoMetadata, ProviderError> {
    let kind = PillarKind::classify(&script.metadata.pillar);
    let now = Local::now();

    Ok(VideoMetadata {
      title: self.title(script),
      description: self.description(script),
      tags: self.tags(script),
      category: kind.map_or("Entertainment", |k| k.video_category()).to_string(),
      custom_thumbnail: String::new(),
      publish_time: next_publish_time(now.naive_local()),
      playlist: kind.map_or("General Content", |k| k.name()).to_string(),
      language: "en".to_string(),
      subtitles: true,
      comments_enabled: true,
      age_restriction: "none".to_string(),
      generated_at: now,
    })
  }
}

/// Text up to the first sentence break. `!` and `?` are kept, `.` is dropped.
fn first_sentence(text: &str) -> &str {
  match text.find(['.', '!', '?']) {
    Some(i) if text[i..].starts_with('.') => &text[..i],
    Some(i) => &text[..=i],
    None => text,
  }
}

fn pillar_label(script: &Script) -> String {
  match PillarKind::classify(&script.metadata.pillar) {
    Some(kind) => kind.name().to_string(),
    None if !script.metadata.pillar.is_empty() => pillar::title_case(&script.metadata.pillar),
    None => "Adventures".to_string(),
  }
}

fn description_hashtags(kind: Option<PillarKind>) -> Vec<&'static str> {
  let extra = kind.map(|k| k.description_hashtags()).unwrap_or(&[]);
  let mut hashtags: Vec<&'static str> = Vec::new();
  for tag in DESCRIPTION_HASHTAGS.iter().chain(extra) {
    if !hashtags.contains(tag) {
      hashtags.push(*tag);
    }
  }
  hashtags
}

/// Distinct lowercase words worth tagging, in order of appearance.
fn content_keywords(text: &str) -> Vec<String> {
  let mut words = Vec::new();
  for raw in text.split_whitespace() {
    let word: String = raw
      .chars()
      .filter(|c| c.is_alphanumeric())
      .flat_map(char::to_lowercase)
      .collect();
    if word.chars().count() > 3
      && !STOP_WORDS.contains(&word.as_str())
      && !word.chars().all(|c| c.is_ascii_digit())
      && !words.contains(&word)
    {
      words.push(word);
    }
  }
  words
}

/// The next 10:00 strictly after `now`.
pub fn next_publish_time(now: NaiveDateTime) -> NaiveDateTime {
  let slot = NaiveTime::from_hms_opt(PUBLISH_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
  let today = now.date().and_time(slot);
  if today > now {
    today
  } else {
    now
      .date()
      .checked_add_days(Days::new(1))
      .map(|date| date.and_time(slot))
      .unwrap_or(today)
  }
}
