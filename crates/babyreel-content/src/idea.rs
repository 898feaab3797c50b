//! Content ideas and weekly plans.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use babyreel_config::{InputParams, WorkItem};
use chrono::{Datelike, Days, Local, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::calendar::{self, MonthlyTheme};
use crate::error::ProviderError;
use crate::pillar::{self, BABY_NAME, PillarKind};
use crate::taxonomy::Taxonomy;

/// A single content idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
  /// Pillar display name.
  pub pillar: String,
  pub pillar_key: String,
  pub category: String,
  pub subcategory: String,
  pub key_elements: Vec<String>,
  pub target_audience: String,
  pub content_mix_percentage: u32,
  pub suggested_title: String,
  pub description: String,
  pub video_length: String,
  pub engagement_focus: String,
  pub hashtags: Vec<String>,
  pub filming_tips: Vec<String>,
  pub editing_suggestions: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub theme: Option<MonthlyTheme>,
}

/// Parameters for one idea.
///
/// `theme_based` wins over an explicit pillar; with neither, the pillar is
/// picked at random.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaRequest {
  pub pillar: Option<String>,
  pub category: Option<String>,
  pub subcategory: Option<String>,
  pub theme_based: bool,
}

impl From<&InputParams> for IdeaRequest {
  fn from(params: &InputParams) -> Self {
    Self {
      pillar: params.pillar.clone(),
      category: params.category.clone(),
      subcategory: params.subcategory.clone(),
      theme_based: params.theme_based,
    }
  }
}

impl From<&WorkItem> for IdeaRequest {
  fn from(item: &WorkItem) -> Self {
    Self {
      pillar: item.pillar.clone(),
      category: item.category.clone(),
      subcategory: item.subcategory.clone(),
      theme_based: item.theme_based,
    }
  }
}

/// One day of a weekly plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
  /// Lowercase weekday name.
  pub day: String,
  pub date: NaiveDate,
  pub content_type: String,
  pub video_length: String,
  pub secondary_focus: String,
  /// Explicit publish time; the schedule falls back to the weekday default.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub publishing_time: Option<NaiveTime>,
  pub idea: Idea,
}

/// Seven consecutive days of planned content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
  pub week_start: NaiveDate,
  pub week_end: NaiveDate,
  pub monthly_theme: MonthlyTheme,
  pub content_schedule: Vec<DayPlan>,
  /// Pillar display name to number of days.
  pub pillar_distribution: BTreeMap<String, usize>,
}

/// Source of content ideas.
#[async_trait]
pub trait IdeaProvider: Send + Sync {
  async fn generate_idea(&self, request: &IdeaRequest) -> Result<Idea, ProviderError>;

  /// Plan seven days starting at `start`.
  async fn weekly_plan(&self, start: NaiveDate) -> Result<WeeklyPlan, ProviderError>;
}

/// Idea generator backed by the taxonomy and fixed copy tables.
pub struct TemplateIdeaGenerator {
  taxonomy: Arc<Taxonomy>,
  rng: Mutex<StdRng>,
  month: Option<u32>,
}

impl TemplateIdeaGenerator {
  pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
    Self {
      taxonomy,
      rng: Mutex::new(StdRng::from_os_rng()),
      month: None,
    }
  }

  /// Deterministic generator for reproducible output.
  pub fn with_seed(taxonomy: Arc<Taxonomy>, seed: u64) -> Self {
    Self {
      taxonomy,
      rng: Mutex::new(StdRng::seed_from_u64(seed)),
      month: None,
    }
  }

  /// Pin the month used for theme-based ideas instead of the current one.
  pub fn with_month(mut self, month: u32) -> Self {
    self.month = Some(month);
    self
  }

  fn current_month(&self) -> u32 {
    self.month.unwrap_or_else(|| Local::now().month())
  }

  fn pick_index(&self, len: usize) -> usize {
    let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    rng.random_range(0..len)
  }

  fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
      None
    } else {
      items.get(self.pick_index(items.len()))
    }
  }

  fn random_pillar_key(&self) -> Result<String, ProviderError> {
    let keys: Vec<&str> = self.taxonomy.pillar_keys().collect();
    self
      .pick(&keys)
      .map(|key| key.to_string())
      .ok_or_else(|| ProviderError::Generation("taxonomy has no pillars".to_string()))
  }

  /// Resolve a pillar kind to a key present in the taxonomy.
  fn key_for_kind(&self, kind: PillarKind) -> Result<String, ProviderError> {
    if self.taxonomy.pillar(kind.key()).is_ok() {
      return Ok(kind.key().to_string());
    }
    if let Some(key) = self.taxonomy.key_for_name(kind.name()) {
      return Ok(key.to_string());
    }
    self.random_pillar_key()
  }

  fn theme_based_idea(&self) -> Result<Idea, ProviderError> {
    let month = self.current_month();
    let key = self.key_for_kind(calendar::theme_pillar(month))?;
    let mut idea = self.pillar_idea(&key, None, None)?;
    idea.theme = Some(calendar::monthly_theme(month));
    Ok(idea)
  }

  fn pillar_idea(
    &self,
    pillar_key: &str,
    category: Option<&str>,
    subcategory: Option<&str>,
  ) -> Result<Idea, ProviderError> {
    let pillar = self.taxonomy.pillar(pillar_key)?;

    let category = match category {
      Some(category) => category.to_string(),
      None => {
        let names: Vec<&String> = pillar.categories.keys().collect();
        self
          .pick(&names)
          .map(|name| name.to_string())
          .ok_or_else(|| ProviderError::EmptyPillar {
            pillar: pillar_key.to_string(),
          })?
      }
    };
    let category_data = self.taxonomy.category(pillar_key, &category)?;

    let subcategory = match subcategory {
      Some(subcategory) => subcategory.to_string(),
      None => self
        .pick(&category_data.subcategories)
        .cloned()
        .ok_or_else(|| ProviderError::UnknownSubcategory {
          pillar: pillar_key.to_string(),
          subcategory: String::new(),
        })?,
    };

    let topic = pillar::title_case(&subcategory);
    let human = pillar::humanize(&subcategory);
    let kind = pillar.kind();

    let suggested_title = match kind {
      Some(kind) => {
        let titles = kind.title_templates(&topic);
        titles[self.pick_index(titles.len())].clone()
      }
      None => format!("{BABY_NAME}'s Amazing Adventure!"),
    };

    Ok(Idea {
      pillar: pillar.name.clone(),
      pillar_key: pillar_key.to_string(),
      category: category.clone(),
      subcategory: subcategory.clone(),
      key_elements: category_data.key_elements.clone(),
      target_audience: pillar.target_audience.clone(),
      content_mix_percentage: pillar.content_mix_percentage,
      suggested_title,
      description: kind.map(|k| k.description(&human)).unwrap_or_else(|| {
        format!("Join us for another amazing adventure with {BABY_NAME}!")
      }),
      video_length: kind.map_or("5 minutes", |k| k.video_length()).to_string(),
      engagement_focus: kind
        .map_or("Balanced engagement", |k| k.engagement_focus())
        .to_string(),
      hashtags: idea_hashtags(kind, &pillar.name, &category, &subcategory),
      filming_tips: to_strings(
        kind.map_or(&["Capture authentic moments and have fun!"][..], |k| k.filming_tips()),
      ),
      editing_suggestions: to_strings(
        kind.map_or(&["Keep editing clean and engaging!"][..], |k| k.editing_suggestions()),
      ),
      theme: None,
    })
  }
}

#[async_trait]
impl IdeaProvider for TemplateIdeaGenerator {
  async fn generate_idea(&self, request: &IdeaRequest) -> Result<Idea, ProviderError> {
    if request.theme_based {
      return self.theme_based_idea();
    }

    let pillar_key = match &request.pillar {
      Some(pillar) => pillar.clone(),
      None => self.random_pillar_key()?,
    };

    self.pillar_idea(
      &pillar_key,
      request.category.as_deref(),
      request.subcategory.as_deref(),
    )
  }

  async fn weekly_plan(&self, start: NaiveDate) -> Result<WeeklyPlan, ProviderError> {
    let mut content_schedule = Vec::with_capacity(7);
    let mut pillar_distribution = BTreeMap::new();

    for offset in 0..7u64 {
      let date = start
        .checked_add_days(Days::new(offset))
        .ok_or_else(|| ProviderError::Generation(format!("date out of range: {start}")))?;
      let slot = calendar::day_slot(date.weekday());

      let kind = match slot.pillar {
        Some(kind) => kind,
        None => PillarKind::ALL[self.pick_index(PillarKind::ALL.len())],
      };
      let key = self.key_for_kind(kind)?;
      let idea = self.pillar_idea(&key, None, None)?;

      *pillar_distribution.entry(idea.pillar.clone()).or_insert(0) += 1;

      content_schedule.push(DayPlan {
        day: calendar::weekday_name(slot.weekday).to_string(),
        date,
        content_type: slot.content_type.to_string(),
        video_length: slot.video_length.to_string(),
        secondary_focus: slot.secondary_focus.to_string(),
        publishing_time: None,
        idea,
      });
    }

    let week_end = start
      .checked_add_days(Days::new(6))
      .ok_or_else(|| ProviderError::Generation(format!("date out of range: {start}")))?;

    Ok(WeeklyPlan {
      week_start: start,
      week_end,
      monthly_theme: calendar::monthly_theme(start.month()),
      content_schedule,
      pillar_distribution,
    })
  }
}

fn idea_hashtags(
  kind: Option<PillarKind>,
  pillar_name: &str,
  category: &str,
  subcategory: &str,
) -> Vec<String> {
  let mut tags: Vec<String> = pillar::base_hashtags()
    .iter()
    .chain(kind.map_or(&[][..], |k| k.idea_hashtags()))
    .map(|tag| tag.to_string())
    .collect();

  tags.push(format!("#{}", pillar::title_case(subcategory).replace(' ', "")));
  tags.push(format!("#{}", pillar::title_case(category).replace(' ', "")));
  tags.push(format!(
    "#{}",
    pillar_name.replace('&', "").replace(' ', "")
  ));

  tags.sort();
  tags.dedup();
  tags
}

fn to_strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn generator() -> TemplateIdeaGenerator {
    TemplateIdeaGenerator::with_seed(Arc::new(Taxonomy::builtin()), 7)
  }

  #[tokio::test]
  async fn test_pillar_idea_fills_missing_levels() {
    let request = IdeaRequest {
      pillar: Some("pillar_3_parenting_hacks".to_string()),
      ..Default::default()
    };
    let idea = generator().generate_idea(&request).await.unwrap();

    assert_eq!(idea.pillar, "Parenting Hacks & Tips");
    let taxonomy = Taxonomy::builtin();
    let category = taxonomy.category("pillar_3_parenting_hacks", &idea.category).unwrap();
    assert!(category.subcategories.contains(&idea.subcategory));
    assert_eq!(idea.video_length, "6-8 minutes");
    assert!(idea.theme.is_none());
  }

  #[tokio::test]
  async fn test_explicit_levels_are_kept() {
    let request = IdeaRequest {
      pillar: Some("pillar_2_daily_adventures".to_string()),
      category: Some("everyday_discoveries".to_string()),
      subcategory: Some("bath_time_fun".to_string()),
      theme_based: false,
    };
    let idea = generator().generate_idea(&request).await.unwrap();
    assert_eq!(idea.category, "everyday_discoveries");
    assert_eq!(idea.subcategory, "bath_time_fun");
    assert!(idea.hashtags.contains(&"#BathTimeFun".to_string()));
    assert!(idea.suggested_title.contains("Bath Time Fun"));
  }

  #[tokio::test]
  async fn test_hashtags_are_unique() {
    let idea = generator().generate_idea(&IdeaRequest::default()).await.unwrap();
    let mut sorted = idea.hashtags.clone();
    sorted.dedup();
    assert_eq!(sorted.len(), idea.hashtags.len());
  }

  #[tokio::test]
  async fn test_invalid_pillar_is_an_error() {
    let request = IdeaRequest {
      pillar: Some("pillar_42".to_string()),
      ..Default::default()
    };
    let err = generator().generate_idea(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidPillar(p) if p == "pillar_42"));
  }

  #[tokio::test]
  async fn test_theme_based_idea_uses_month_theme() {
    let generator = generator().with_month(8);
    let request = IdeaRequest {
      theme_based: true,
      ..Default::default()
    };
    let idea = generator.generate_idea(&request).await.unwrap();
    assert_eq!(idea.pillar_key, "pillar_3_parenting_hacks");
    assert_eq!(idea.theme.unwrap().primary_theme, "Back to Basics");
  }

  #[tokio::test]
  async fn test_same_seed_same_ideas() {
    let a = generator().generate_idea(&IdeaRequest::default()).await.unwrap();
    let b = generator().generate_idea(&IdeaRequest::default()).await.unwrap();
    assert_eq!(a, b);
  }

  #[tokio::test]
  async fn test_weekly_plan_covers_seven_days() {
    let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let plan = generator().weekly_plan(start).await.unwrap();

    assert_eq!(plan.content_schedule.len(), 7);
    assert_eq!(plan.week_end, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
    assert_eq!(plan.content_schedule[0].day, "monday");
    assert_eq!(plan.content_schedule[0].idea.pillar_key, "pillar_1_developmental_milestones");
    assert_eq!(plan.content_schedule[6].day, "sunday");
    assert_eq!(plan.content_schedule[6].content_type, "Wind-down Activity");
    assert_eq!(plan.pillar_distribution.values().sum::<usize>(), 7);
    assert_eq!(plan.monthly_theme.month, "june");
  }

  #[tokio::test]
  async fn test_weekly_plan_follows_start_weekday() {
    // 2024-06-12 is a Wednesday.
    let start = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
    let plan = generator().weekly_plan(start).await.unwrap();
    assert_eq!(plan.content_schedule[0].day, "wednesday");
    assert_eq!(plan.content_schedule[0].content_type, "Product Review");
  }
}
