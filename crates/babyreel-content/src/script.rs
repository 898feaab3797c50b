//! Video scripts and prompt rendering.

use std::sync::Arc;

use async_trait::async_trait;
use babyreel_config::{CustomParams, InputParams, WorkItem};
use chrono::{DateTime, Local};
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::pillar::{self, BABY_NAME, PillarKind};
use crate::taxonomy::Taxonomy;

/// Pillar used for single scripts when none is configured.
pub const DEFAULT_SCRIPT_PILLAR: &str = "pillar_2_daily_adventures";
pub const DEFAULT_SCRIPT_CATEGORY: &str = "everyday_discoveries";
pub const DEFAULT_SCRIPT_SUBCATEGORY: &str = "morning_routine_magic";

/// Section names every complete script carries, in playback order.
pub const SCRIPT_SECTIONS: [&str; 5] = [
  "hook",
  "setup",
  "main_content",
  "educational_element",
  "conclusion",
];

/// One timed section of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSection {
  pub content: String,
  #[serde(default)]
  pub visual_description: String,
  #[serde(default)]
  pub audio: String,
  /// Time range such as `0:00-0:15`.
  #[serde(default)]
  pub duration: String,
}

/// The spoken and visual body of a script.
///
/// Sections are optional so externally authored scripts still load and can
/// be scored for what they are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptBody {
  #[serde(default)]
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hook: Option<ScriptSection>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub setup: Option<ScriptSection>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub main_content: Option<ScriptSection>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub educational_element: Option<ScriptSection>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub conclusion: Option<ScriptSection>,
}

impl ScriptBody {
  pub fn section(&self, name: &str) -> Option<&ScriptSection> {
    match name {
      "hook" => self.hook.as_ref(),
      "setup" => self.setup.as_ref(),
      "main_content" => self.main_content.as_ref(),
      "educational_element" => self.educational_element.as_ref(),
      "conclusion" => self.conclusion.as_ref(),
      _ => None,
    }
  }

  /// Title plus the content of every present section, space separated.
  pub fn full_text(&self) -> String {
    let mut parts = Vec::with_capacity(SCRIPT_SECTIONS.len() + 1);
    if !self.title.is_empty() {
      parts.push(self.title.as_str());
    }
    for name in SCRIPT_SECTIONS {
      if let Some(section) = self.section(name) {
        parts.push(section.content.as_str());
      }
    }
    parts.join(" ")
  }
}

/// Generation context recorded alongside a script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptMetadata {
  #[serde(default)]
  pub pillar: String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub subcategory: String,
  #[serde(default)]
  pub baby_age: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub generated_at: Option<DateTime<Local>>,
  #[serde(default)]
  pub prompt: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hashtags: Option<Vec<String>>,
}

/// A generated script artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
  #[serde(default)]
  pub metadata: ScriptMetadata,
  #[serde(default)]
  pub script: ScriptBody,
}

/// Parameters for one script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRequest {
  pub pillar: String,
  pub category: Option<String>,
  pub subcategory: String,
  pub baby_age: String,
  pub custom: CustomParams,
}

impl From<&InputParams> for ScriptRequest {
  fn from(params: &InputParams) -> Self {
    Self {
      pillar: params
        .pillar
        .clone()
        .unwrap_or_else(|| DEFAULT_SCRIPT_PILLAR.to_string()),
      category: Some(
        params
          .category
          .clone()
          .unwrap_or_else(|| DEFAULT_SCRIPT_CATEGORY.to_string()),
      ),
      subcategory: params
        .subcategory
        .clone()
        .unwrap_or_else(|| DEFAULT_SCRIPT_SUBCATEGORY.to_string()),
      baby_age: params.baby_age.clone(),
      custom: params.custom.clone(),
    }
  }
}

impl TryFrom<&WorkItem> for ScriptRequest {
  type Error = ProviderError;

  fn try_from(item: &WorkItem) -> Result<Self, Self::Error> {
    Ok(Self {
      pillar: item
        .pillar
        .clone()
        .ok_or(ProviderError::MissingParameter("pillar"))?,
      category: item.category.clone(),
      subcategory: item
        .subcategory
        .clone()
        .ok_or(ProviderError::MissingParameter("subcategory"))?,
      baby_age: item.baby_age.clone(),
      custom: item.custom_params.clone(),
    })
  }
}

/// Source of video scripts.
#[async_trait]
pub trait ScriptProvider: Send + Sync {
  async fn generate_script(&self, request: &ScriptRequest) -> Result<Script, ProviderError>;
}

/// Script generator that renders pillar prompts and fills the section
/// structure from templates.
pub struct TemplateScriptGenerator {
  taxonomy: Arc<Taxonomy>,
}

impl TemplateScriptGenerator {
  pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
    Self { taxonomy }
  }

  /// Render the full prompt for a request.
  pub fn prompt(&self, request: &ScriptRequest) -> Result<String, ProviderError> {
    let pillar = self.taxonomy.pillar(&request.pillar)?;
    let (_, category) = self
      .taxonomy
      .category_of(&request.pillar, &request.subcategory)?;

    let custom = &request.custom;
    let env = Environment::new();
    let rendered = env.render_str(
      &pillar.prompt_template,
      context! {
        subcategory => request.subcategory,
        baby_age => request.baby_age,
        audience_focus => pillar.target_audience,
        activity_description => custom.activity_description,
        key_elements => category.key_elements.join(", "),
        tone => custom.tone,
        parenting_challenge => custom.parenting_challenge,
        practical_elements => custom.practical_elements,
        audience_need => custom.audience_need,
        emotional_elements => custom.emotional_elements,
        entertainment_elements => custom.entertainment_elements,
      },
    )?;

    Ok(format!(
      "{rendered}\n\n\
       VIDEO STRUCTURE REQUIREMENTS:\n\
       - Total duration: 4 minutes 30 seconds\n\
       - Hook (0:00-0:15): High-energy, attention-grabbing opening\n\
       - Setup (0:15-0:30): Context establishment and what to expect\n\
       - Main Content (0:30-3:30): Core content with engaging segments\n\
       - Educational Element (3:30-4:00): Learning point or takeaway\n\
       - Conclusion (4:00-4:30): Summary and call-to-action\n\n\
       STYLE GUIDELINES:\n\
       - Tone: {tone}\n\
       - Pacing: Dynamic but natural\n\
       - Visual: Multiple camera angles, authentic moments\n\
       - Audio: Clear voiceover, appropriate background music\n\n\
       CONTENT REQUIREMENTS:\n\
       - Focus on {subcategory} within {pillar_name}\n\
       - Baby age: {baby_age}\n\
       - Target audience: {audience}\n\
       - Include authentic baby reactions and moments\n\
       - Provide educational value where appropriate\n\
       - End with clear call-to-action\n",
      tone = custom.tone,
      subcategory = request.subcategory,
      pillar_name = pillar.name,
      baby_age = request.baby_age,
      audience = pillar.target_audience,
    ))
  }

  fn body(&self, kind: Option<PillarKind>, subcategory: &str) -> ScriptBody {
    let topic = pillar::humanize(subcategory);
    let main = match kind {
      Some(kind) => kind.main_content(&topic),
      None => format!(
        "Today we're exploring {topic} and it's such a wonderful experience! \
         {BABY_NAME} approaches this with her natural curiosity and enthusiasm. \
         Each moment brings new discoveries that capture the essence of childhood wonder. \
         These moments become cherished memories that we'll look back on with fondness."
      ),
    };

    ScriptBody {
      title: format!("{BABY_NAME}'s {} Adventure", pillar::title_case(subcategory)),
      hook: Some(section(
        format!(
          "Get ready for something amazing! Today we're exploring {topic} and {BABY_NAME}'s reaction is priceless!"
        ),
        "Close-up of the baby's excited face with text overlay",
        "Upbeat trending music starts",
        "0:00-0:15",
      )),
      setup: Some(section(
        format!(
          "Hi everyone! Today we're going to try {topic} and I'm so excited because it's a first for us. \
           {BABY_NAME} has been looking forward to this all morning!"
        ),
        "Wide shot of the activity setup",
        "Music continues at moderate volume",
        "0:15-0:30",
      )),
      main_content: Some(section(
        main,
        "Multiple camera angles capturing authentic moments",
        "Background music with clear voiceover",
        "0:30-3:30",
      )),
      educational_element: Some(section(
        format!(
          "Did you know that activities like {topic} support early learning? \
           This is great for {BABY_NAME}'s development. Pro tip: follow your baby's lead and keep it playful."
        ),
        "Clean text overlay with simple graphics",
        "Reduced background music",
        "3:30-4:00",
      )),
      conclusion: Some(section(
        format!(
          "Thanks for joining us today for this {topic} adventure! If you enjoyed this video, \
           don't forget to subscribe and hit the notification bell. What should we try next? \
           Let me know in the comments below!"
        ),
        "Happy family moment with channel branding",
        "Music fades out",
        "4:00-4:30",
      )),
    }
  }
}

fn section(content: String, visual: &str, audio: &str, duration: &str) -> ScriptSection {
  ScriptSection {
    content,
    visual_description: visual.to_string(),
    audio: audio.to_string(),
    duration: duration.to_string(),
  }
}

#[async_trait]
impl ScriptProvider for TemplateScriptGenerator {
  async fn generate_script(&self, request: &ScriptRequest) -> Result<Script, ProviderError> {
    let prompt = self.prompt(request)?;
    let pillar = self.taxonomy.pillar(&request.pillar)?;
    let (category, _) = self
      .taxonomy
      .category_of(&request.pillar, &request.subcategory)?;

    Ok(Script {
      metadata: ScriptMetadata {
        pillar: request.pillar.clone(),
        category: category.to_string(),
        subcategory: request.subcategory.clone(),
        baby_age: request.baby_age.clone(),
        generated_at: Some(Local::now()),
        prompt,
        title: None,
        hashtags: None,
      },
      script: self.body(pillar.kind(), &request.subcategory),
    })
  }
}
