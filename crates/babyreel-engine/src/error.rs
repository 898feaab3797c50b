//! Engine error types.

use std::time::Duration;

use babyreel_config::WorkflowStep;

use crate::state::WorkflowState;

/// Errors that stop a workflow run.
///
/// Both variants carry the state reached so far so callers can still report.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
  #[error("step '{step}' failed: {message}")]
  StepFailed {
    step: WorkflowStep,
    message: String,
    state: Box<WorkflowState>,
  },

  #[error("workflow cancelled")]
  Cancelled { state: Box<WorkflowState> },
}

impl WorkflowError {
  pub fn state(&self) -> &WorkflowState {
    match self {
      WorkflowError::StepFailed { state, .. } | WorkflowError::Cancelled { state } => state,
    }
  }

  pub fn into_state(self) -> WorkflowState {
    match self {
      WorkflowError::StepFailed { state, .. } | WorkflowError::Cancelled { state } => *state,
    }
  }
}

/// Why a single step failed. Recorded as a string in the workflow state.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
  #[error(transparent)]
  Provider(#[from] babyreel_content::ProviderError),

  #[error("failed to write output: {0}")]
  Artifact(#[from] babyreel_artifact::Error),

  #[error(transparent)]
  Batch(#[from] babyreel_batch::BatchError),

  #[error("failed to build schedule: {0}")]
  Schedule(#[from] babyreel_schedule::ScheduleError),

  #[error("batch processing requires a batch file")]
  MissingBatchFile,

  #[error("no ideas generated out of {requested} requested")]
  NoIdeasGenerated { requested: usize },

  #[error("all {failed} batch items failed")]
  BatchFailed { failed: usize },

  #[error("provider call timed out after {}s", .0.as_secs_f64())]
  Timeout(Duration),
}
