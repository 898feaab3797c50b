//! Batch configuration documents.
//!
//! ```json
//! {
//!   "type": "scripts",
//!   "max_workers": 4,
//!   "continue_on_error": true,
//!   "output_dir": "generated-scripts",
//!   "items": [
//!     { "pillar": "pillar_2_daily_adventures", "category": "everyday_discoveries",
//!       "subcategory": "morning_routine_magic", "filename": "morning.json" }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::{CustomParams, DEFAULT_BABY_AGE};

/// Worker pool size used when a batch does not specify one.
pub const DEFAULT_MAX_WORKERS: usize = 4;

fn default_max_workers() -> usize {
  DEFAULT_MAX_WORKERS
}

fn default_true() -> bool {
  true
}

fn default_baby_age() -> String {
  DEFAULT_BABY_AGE.to_string()
}

/// What a batch generates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
  #[default]
  Scripts,
  Ideas,
}

impl BatchKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      BatchKind::Scripts => "scripts",
      BatchKind::Ideas => "ideas",
    }
  }

  /// Prefix for generated per-item filenames (`script_3_<ts>.json`).
  pub fn file_prefix(&self) -> &'static str {
    match self {
      BatchKind::Scripts => "script",
      BatchKind::Ideas => "idea",
    }
  }
}

impl fmt::Display for BatchKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BatchKind {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "scripts" => Ok(BatchKind::Scripts),
      "ideas" => Ok(BatchKind::Ideas),
      other => Err(ConfigError::UnknownBatchType(other.to_string())),
    }
  }
}

/// One unit of batch work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
  /// Human label used in progress output.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default)]
  pub pillar: Option<String>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub subcategory: Option<String>,
  #[serde(default = "default_baby_age")]
  pub baby_age: String,
  #[serde(default)]
  pub theme_based: bool,
  #[serde(default)]
  pub custom_params: CustomParams,
  /// Explicit output filename; `.json` is appended when missing.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filename: Option<String>,
}

impl WorkItem {
  pub fn label(&self) -> &str {
    self.title.as_deref().unwrap_or("Untitled")
  }
}

/// A batch configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
  #[serde(rename = "type", default)]
  pub kind: BatchKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output_dir: Option<PathBuf>,
  #[serde(default = "default_max_workers")]
  pub max_workers: usize,
  #[serde(default = "default_true")]
  pub continue_on_error: bool,
  pub items: Vec<WorkItem>,
}

impl BatchConfig {
  /// Parse and validate a batch configuration document.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    let raw: serde_json::Value = serde_json::from_str(content)?;

    if raw.get("items").is_none() {
      return Err(ConfigError::MissingItems);
    }

    if let Some(kind) = raw.get("type").and_then(|t| t.as_str()) {
      kind.parse::<BatchKind>()?;
    }

    let config: BatchConfig = serde_json::from_value(raw)?;
    config.validate()?;
    Ok(config)
  }

  /// Check the invariants a runnable batch must satisfy.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.items.is_empty() {
      return Err(ConfigError::EmptyItems);
    }
    if self.max_workers == 0 {
      return Err(ConfigError::InvalidMaxWorkers(self.max_workers));
    }
    Ok(())
  }

  /// A sample configuration with `count` items, cycling through the five pillars.
  pub fn default_for(kind: BatchKind, count: usize) -> Self {
    let samples = [
      ("pillar_1_developmental_milestones", "learning_activities", "sensory_play_sessions"),
      ("pillar_2_daily_adventures", "everyday_discoveries", "morning_routine_magic"),
      ("pillar_3_parenting_hacks", "sleep_solutions", "bedtime_routine_tips"),
      ("pillar_4_family_bonding", "family_traditions", "weekend_family_rituals"),
      ("pillar_5_fun_challenges", "reaction_challenges", "first_taste_test"),
    ];

    let items = (0..count)
      .map(|i| {
        let (pillar, category, subcategory) = samples[i % samples.len()];
        let pillar = pillar.to_string();
        match kind {
          BatchKind::Scripts => WorkItem {
            title: Some(format!("Sample script {}", i + 1)),
            pillar: Some(pillar),
            category: Some(category.to_string()),
            subcategory: Some(subcategory.to_string()),
            baby_age: default_baby_age(),
            theme_based: false,
            custom_params: CustomParams {
              activity_description: format!("Test activity {}", i + 1),
              ..CustomParams::default()
            },
            filename: None,
          },
          BatchKind::Ideas => WorkItem {
            title: Some(format!("Sample idea {}", i + 1)),
            pillar: Some(pillar),
            theme_based: i % 2 == 0,
            ..WorkItem::default()
          },
        }
      })
      .collect();

    Self {
      kind,
      description: Some(format!("Default {} batch configuration", kind)),
      output_dir: Some(PathBuf::from(format!("generated-{}", kind))),
      max_workers: DEFAULT_MAX_WORKERS,
      continue_on_error: true,
      items,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_applied() {
    let config = BatchConfig::from_json(r#"{ "items": [{ "pillar": "pillar_1" }] }"#).unwrap();
    assert_eq!(config.kind, BatchKind::Scripts);
    assert_eq!(config.max_workers, 4);
    assert!(config.continue_on_error);
    assert_eq!(config.items[0].baby_age, "8 months");
    assert_eq!(config.items[0].custom_params.tone, "warm and engaging");
  }

  #[test]
  fn test_missing_items() {
    let err = BatchConfig::from_json(r#"{ "type": "ideas" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingItems));
  }

  #[test]
  fn test_empty_items() {
    let err = BatchConfig::from_json(r#"{ "items": [] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyItems));
  }

  #[test]
  fn test_unknown_type() {
    let err = BatchConfig::from_json(r#"{ "type": "videos", "items": [{}] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownBatchType(t) if t == "videos"));
  }

  #[test]
  fn test_zero_workers_rejected() {
    let err = BatchConfig::from_json(r#"{ "max_workers": 0, "items": [{}] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMaxWorkers(0)));
  }

  #[test]
  fn test_invalid_json() {
    let err = BatchConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn test_default_for_cycles_pillars() {
    let config = BatchConfig::default_for(BatchKind::Ideas, 7);
    assert_eq!(config.items.len(), 7);
    assert_eq!(
      config.items[5].pillar.as_deref(),
      Some("pillar_1_developmental_milestones")
    );
    assert!(config.items[0].theme_based);
    assert!(!config.items[1].theme_based);
    config.validate().unwrap();
  }
}
