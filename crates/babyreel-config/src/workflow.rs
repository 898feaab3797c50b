use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::InputParams;
use crate::step::WorkflowStep;

/// Output directory used when a caller does not pick one.
pub const DEFAULT_OUTPUT_DIR: &str = "generated-content";

/// Log verbosity for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Debug,
  #[default]
  Info,
  Warning,
  Error,
}

impl LogLevel {
  /// Directive understood by `tracing_subscriber::EnvFilter`.
  pub fn as_filter(&self) -> &'static str {
    match self {
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warning => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_filter())
  }
}

impl FromStr for LogLevel {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "debug" => Ok(LogLevel::Debug),
      "info" => Ok(LogLevel::Info),
      "warn" | "warning" => Ok(LogLevel::Warning),
      "error" => Ok(LogLevel::Error),
      _ => Err(ConfigError::UnknownLogLevel(s.to_string())),
    }
  }
}

/// Configuration for one workflow run.
///
/// Built once per run and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
  /// Steps in execution order. Duplicates are allowed.
  pub steps: Vec<WorkflowStep>,
  #[serde(default)]
  pub params: InputParams,
  pub output_dir: PathBuf,
  /// Record failed steps and keep going instead of aborting.
  #[serde(default)]
  pub continue_on_error: bool,
  /// Announce steps without calling providers or writing files.
  #[serde(default)]
  pub dry_run: bool,
  #[serde(default)]
  pub log_level: LogLevel,
}

impl WorkflowConfig {
  /// Create a config for the given steps with default parameters.
  pub fn new(steps: Vec<WorkflowStep>, output_dir: impl Into<PathBuf>) -> Self {
    Self {
      steps,
      params: InputParams::default(),
      output_dir: output_dir.into(),
      continue_on_error: false,
      dry_run: false,
      log_level: LogLevel::default(),
    }
  }

  /// Directory scanned by the quality and metadata steps.
  ///
  /// Falls back to `<output_dir>/scripts`, where the script step writes.
  pub fn script_dir(&self) -> PathBuf {
    self
      .params
      .script_dir
      .clone()
      .unwrap_or_else(|| self.output_dir.join("scripts"))
  }
}

impl Default for WorkflowConfig {
  fn default() -> Self {
    Self::new(WorkflowStep::DEFAULT_PIPELINE.to_vec(), DEFAULT_OUTPUT_DIR)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_log_level_parsing() {
    assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    assert_eq!(LogLevel::Warning.as_filter(), "warn");
    assert!("verbose".parse::<LogLevel>().is_err());
  }

  #[test]
  fn test_script_dir_defaults_under_output_dir() {
    let config = WorkflowConfig::new(vec![WorkflowStep::QualityCheck], "/tmp/out");
    assert_eq!(config.script_dir(), PathBuf::from("/tmp/out/scripts"));

    let mut config = config;
    config.params.script_dir = Some(PathBuf::from("/data/scripts"));
    assert_eq!(config.script_dir(), PathBuf::from("/data/scripts"));
  }

  #[test]
  fn test_deserialize_minimal_config() {
    let config: WorkflowConfig = serde_json::from_str(
      r#"{ "steps": ["generate_scripts", "quality_check"], "output_dir": "out" }"#,
    )
    .unwrap();

    assert_eq!(
      config.steps,
      vec![WorkflowStep::GenerateScripts, WorkflowStep::QualityCheck]
    );
    assert!(!config.continue_on_error);
    assert_eq!(config.log_level, LogLevel::Info);
  }
}
