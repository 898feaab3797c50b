//! Execution events and notifiers.
//!
//! The engine reports progress through an [`ExecutionNotifier`] instead of
//! printing. Front ends decide how to render events.

use babyreel_config::WorkflowStep;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Lifecycle and progress of one workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  WorkflowStarted {
    execution_id: String,
    steps: Vec<WorkflowStep>,
    dry_run: bool,
  },

  StepStarted {
    execution_id: String,
    step: WorkflowStep,
  },

  StepCompleted {
    execution_id: String,
    step: WorkflowStep,
    data: serde_json::Value,
  },

  StepFailed {
    execution_id: String,
    step: WorkflowStep,
    error: String,
  },

  /// Human-readable progress within a step.
  Progress {
    execution_id: String,
    step: WorkflowStep,
    message: String,
  },

  /// Every step ran. Some may have failed under `continue_on_error`.
  WorkflowCompleted {
    execution_id: String,
    completed: usize,
    failed: usize,
  },

  /// The run stopped early, after a step failure or cancellation.
  WorkflowFailed {
    execution_id: String,
    error: String,
  },
}

/// Sink for [`ExecutionEvent`]s. Called inline, so implementations must not block.
pub trait ExecutionNotifier: Send + Sync {
  fn notify(&self, event: ExecutionEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// Sends events to an unbounded channel.
///
/// Unbounded so a slow consumer never stalls a step; volume is a handful of
/// events per step.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    if self.sender.send(event).is_err() {
      tracing::trace!("event receiver dropped");
    }
  }
}
