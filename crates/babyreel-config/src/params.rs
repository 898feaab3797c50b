//! Generation parameters shared by the workflow steps.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Baby age used when a request does not name one.
pub const DEFAULT_BABY_AGE: &str = "8 months";

fn default_baby_age() -> String {
  DEFAULT_BABY_AGE.to_string()
}

fn default_tone() -> String {
  "warm and engaging".to_string()
}

fn default_idea_count() -> usize {
  5
}

fn default_script_count() -> usize {
  3
}

/// Prompt customization for script generation.
///
/// Every field has a default, so a template placeholder without a matching
/// value renders as the default rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomParams {
  /// Voice of the narration, e.g. "warm and engaging".
  pub tone: String,
  pub activity_description: String,
  pub parenting_challenge: String,
  pub practical_elements: String,
  pub audience_need: String,
  pub emotional_elements: String,
  pub entertainment_elements: String,
  /// Custom thumbnail path carried into generated metadata.
  pub thumbnail: String,
}

impl Default for CustomParams {
  fn default() -> Self {
    Self {
      tone: default_tone(),
      activity_description: String::new(),
      parenting_challenge: String::new(),
      practical_elements: String::new(),
      audience_need: String::new(),
      emotional_elements: String::new(),
      entertainment_elements: String::new(),
      thumbnail: String::new(),
    }
  }
}

/// Input parameters for a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParams {
  /// Pillar key, e.g. `pillar_2_daily_adventures`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pillar: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub subcategory: Option<String>,
  #[serde(default = "default_baby_age")]
  pub baby_age: String,
  /// Generate ideas from the current month's theme.
  #[serde(default)]
  pub theme_based: bool,
  /// Generate a full weekly plan instead of individual ideas.
  #[serde(default)]
  pub weekly_plan: bool,
  /// First day of the weekly plan (defaults to today).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_date: Option<NaiveDate>,
  #[serde(default = "default_idea_count")]
  pub idea_count: usize,
  #[serde(default = "default_script_count")]
  pub script_count: usize,
  /// Batch configuration file used by the script and batch steps.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub batch_file: Option<PathBuf>,
  /// Directory scanned by the quality and metadata steps.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub script_dir: Option<PathBuf>,
  #[serde(default)]
  pub custom: CustomParams,
}

impl Default for InputParams {
  fn default() -> Self {
    Self {
      pillar: None,
      category: None,
      subcategory: None,
      baby_age: default_baby_age(),
      theme_based: false,
      weekly_plan: false,
      start_date: None,
      idea_count: default_idea_count(),
      script_count: default_script_count(),
      batch_file: None,
      script_dir: None,
      custom: CustomParams::default(),
    }
  }
}
