use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use babyreel_artifact::naming::{report_key, timestamp};
use babyreel_artifact::{FsStore, JsonStore};
use babyreel_config::WorkflowStep;
use babyreel_content::BatchSummary;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::state::{StepFailure, WorkflowState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
  pub start_time: DateTime<Local>,
  pub end_time: Option<DateTime<Local>>,
  pub duration_seconds: f64,
  pub completed_steps: usize,
  pub failed_steps: usize,
  pub total_generated_files: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSummary {
  pub total_metadata_files: usize,
}

/// Final report of a run, derived from its state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowReport {
  pub execution_id: String,
  pub workflow_summary: WorkflowSummary,
  pub completed_steps: Vec<WorkflowStep>,
  pub failed_steps: Vec<StepFailure>,
  pub step_results: BTreeMap<String, serde_json::Value>,
  pub file_list: Vec<PathBuf>,
  pub quality_summary: Option<BatchSummary>,
  pub metadata_summary: MetadataSummary,
  pub success: bool,
}

impl WorkflowReport {
  pub fn from_state(state: &WorkflowState) -> Self {
    let duration_seconds = state
      .end_time
      .map(|end| (end - state.start_time).num_milliseconds() as f64 / 1000.0)
      .unwrap_or(0.0);

    Self {
      execution_id: state.execution_id.clone(),
      workflow_summary: WorkflowSummary {
        start_time: state.start_time,
        end_time: state.end_time,
        duration_seconds,
        completed_steps: state.completed_steps.len(),
        failed_steps: state.failed_steps.len(),
        total_generated_files: state.generated_files.len(),
      },
      completed_steps: state.completed_steps.clone(),
      failed_steps: state.failed_steps.clone(),
      step_results: state.results.clone(),
      file_list: state.generated_files.clone(),
      quality_summary: state
        .quality_report
        .as_ref()
        .map(|report| report.batch_summary.clone()),
      metadata_summary: MetadataSummary {
        total_metadata_files: state.metadata_results.len(),
      },
      success: state.is_success(),
    }
  }

  /// Write the report as `workflow_report_<timestamp>.json` under `output_dir`.
  pub async fn save(&self, output_dir: &Path) -> Result<PathBuf, babyreel_artifact::Error> {
    FsStore::new(output_dir)
      .put_json(&report_key("workflow", &timestamp(Local::now())), self)
      .await
  }
}
