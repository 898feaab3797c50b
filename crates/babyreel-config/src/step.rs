use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One stage of the content pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
  GenerateIdeas,
  GenerateScripts,
  QualityCheck,
  GenerateMetadata,
  BatchProcess,
  CreateSchedule,
}

impl WorkflowStep {
  /// Every step, in canonical pipeline order.
  pub const ALL: [WorkflowStep; 6] = [
    WorkflowStep::GenerateIdeas,
    WorkflowStep::GenerateScripts,
    WorkflowStep::QualityCheck,
    WorkflowStep::GenerateMetadata,
    WorkflowStep::BatchProcess,
    WorkflowStep::CreateSchedule,
  ];

  /// The pipeline used when no step is selected explicitly.
  pub const DEFAULT_PIPELINE: [WorkflowStep; 4] = [
    WorkflowStep::GenerateIdeas,
    WorkflowStep::GenerateScripts,
    WorkflowStep::QualityCheck,
    WorkflowStep::GenerateMetadata,
  ];

  /// Stable snake_case name, used as the key in workflow results.
  pub fn as_str(&self) -> &'static str {
    match self {
      WorkflowStep::GenerateIdeas => "generate_ideas",
      WorkflowStep::GenerateScripts => "generate_scripts",
      WorkflowStep::QualityCheck => "quality_check",
      WorkflowStep::GenerateMetadata => "generate_metadata",
      WorkflowStep::BatchProcess => "batch_process",
      WorkflowStep::CreateSchedule => "create_schedule",
    }
  }
}

impl fmt::Display for WorkflowStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for WorkflowStep {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().replace('-', "_").to_ascii_lowercase();
    WorkflowStep::ALL
      .into_iter()
      .find(|step| step.as_str() == normalized)
      .ok_or_else(|| ConfigError::UnknownStep(s.to_string()))
  }
}

/// Boolean step selectors, one per [`WorkflowStep`].
///
/// Front ends that expose a checkbox or flag per step fill this in and call
/// [`StepFlags::into_steps`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepFlags {
  pub generate_ideas: bool,
  pub generate_scripts: bool,
  pub quality_check: bool,
  pub generate_metadata: bool,
  pub batch_process: bool,
  pub create_schedule: bool,
}

impl StepFlags {
  /// Selected steps in canonical order, or the default pipeline if none are set.
  pub fn into_steps(self) -> Vec<WorkflowStep> {
    let selected = [
      (self.generate_ideas, WorkflowStep::GenerateIdeas),
      (self.generate_scripts, WorkflowStep::GenerateScripts),
      (self.quality_check, WorkflowStep::QualityCheck),
      (self.generate_metadata, WorkflowStep::GenerateMetadata),
      (self.batch_process, WorkflowStep::BatchProcess),
      (self.create_schedule, WorkflowStep::CreateSchedule),
    ];

    let steps: Vec<WorkflowStep> = selected
      .into_iter()
      .filter_map(|(enabled, step)| enabled.then_some(step))
      .collect();

    if steps.is_empty() {
      WorkflowStep::DEFAULT_PIPELINE.to_vec()
    } else {
      steps
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_step_names_round_trip_through_from_str() {
    for step in WorkflowStep::ALL {
      assert_eq!(step.as_str().parse::<WorkflowStep>().unwrap(), step);
    }
    assert_eq!(
      "quality-check".parse::<WorkflowStep>().unwrap(),
      WorkflowStep::QualityCheck
    );
  }

  #[test]
  fn test_unknown_step() {
    let err = "publish_video".parse::<WorkflowStep>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownStep(name) if name == "publish_video"));
  }

  #[test]
  fn test_step_serializes_snake_case() {
    let json = serde_json::to_string(&WorkflowStep::GenerateScripts).unwrap();
    assert_eq!(json, "\"generate_scripts\"");
  }

  #[test]
  fn test_no_flags_selects_default_pipeline() {
    assert_eq!(
      StepFlags::default().into_steps(),
      WorkflowStep::DEFAULT_PIPELINE.to_vec()
    );
  }

  #[test]
  fn test_flags_keep_canonical_order() {
    let flags = StepFlags {
      create_schedule: true,
      generate_scripts: true,
      ..Default::default()
    };
    assert_eq!(
      flags.into_steps(),
      vec![WorkflowStep::GenerateScripts, WorkflowStep::CreateSchedule]
    );
  }
}
