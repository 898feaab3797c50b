use std::collections::BTreeMap;
use std::path::PathBuf;

use babyreel_config::WorkflowStep;
use babyreel_content::{BatchEvaluation, VideoMetadata};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::steps::StepOutput;

/// A step that failed and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFailure {
  pub step: WorkflowStep,
  pub error: String,
}

/// Everything a single run has produced so far.
///
/// Owned by one `execute` call; `end_time` is set exactly once when the run
/// completes or stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
  pub execution_id: String,
  pub start_time: DateTime<Local>,
  pub end_time: Option<DateTime<Local>>,
  pub completed_steps: Vec<WorkflowStep>,
  pub failed_steps: Vec<StepFailure>,
  pub generated_files: Vec<PathBuf>,
  /// Step name to that step's result payload.
  pub results: BTreeMap<String, serde_json::Value>,
  pub quality_report: Option<BatchEvaluation>,
  pub metadata_results: Vec<VideoMetadata>,
}

impl WorkflowState {
  pub(crate) fn new() -> Self {
    Self {
      execution_id: uuid::Uuid::new_v4().to_string(),
      start_time: Local::now(),
      end_time: None,
      completed_steps: Vec::new(),
      failed_steps: Vec::new(),
      generated_files: Vec::new(),
      results: BTreeMap::new(),
      quality_report: None,
      metadata_results: Vec::new(),
    }
  }

  pub(crate) fn record_success(&mut self, step: WorkflowStep, output: StepOutput) {
    self.completed_steps.push(step);
    self.results.insert(step.to_string(), output.payload);
    self.generated_files.extend(output.generated_files);
    if let Some(report) = output.quality_report {
      self.quality_report = Some(report);
    }
    if !output.metadata.is_empty() {
      self.metadata_results = output.metadata;
    }
  }

  pub(crate) fn record_failure(&mut self, step: WorkflowStep, error: String) {
    self.failed_steps.push(StepFailure { step, error });
  }

  pub(crate) fn finish(&mut self) {
    if self.end_time.is_none() {
      self.end_time = Some(Local::now());
    }
  }

  pub fn is_success(&self) -> bool {
    self.failed_steps.is_empty()
  }
}
