//! Workflow execution engine.
//!
//! Steps run one at a time in configuration order, since later steps read
//! files written by earlier ones.

use std::time::Duration;

use babyreel_config::{WorkflowConfig, WorkflowStep};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::WorkflowError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::providers::Providers;
use crate::state::WorkflowState;
use crate::steps::StepOutput;

/// Configuration for the workflow engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
  /// Upper bound on a single provider call. Exceeding it fails the call.
  pub provider_timeout: Duration,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      provider_timeout: Duration::from_secs(60),
    }
  }
}

/// The workflow execution engine.
///
/// Generic over `N: ExecutionNotifier` to allow different notification strategies.
/// Use `WorkflowEngine::new()` for an engine with no-op notifications,
/// or `WorkflowEngine::with_notifier()` to observe progress.
pub struct WorkflowEngine<N: ExecutionNotifier = NoopNotifier> {
  pub(crate) providers: Providers,
  pub(crate) config: EngineConfig,
  pub(crate) notifier: N,
}

impl WorkflowEngine<NoopNotifier> {
  pub fn new(providers: Providers, config: EngineConfig) -> Self {
    Self::with_notifier(providers, config, NoopNotifier)
  }
}

impl<N: ExecutionNotifier> WorkflowEngine<N> {
  pub fn with_notifier(providers: Providers, config: EngineConfig, notifier: N) -> Self {
    Self {
      providers,
      config,
      notifier,
    }
  }

  /// Run every configured step in order.
  ///
  /// A failing step is recorded and, with `continue_on_error`, the run moves
  /// on. Without it the run stops and the state travels in
  /// [`WorkflowError::StepFailed`].
  pub async fn execute(
    &self,
    config: &WorkflowConfig,
    cancel: CancellationToken,
  ) -> Result<WorkflowState, WorkflowError> {
    let mut state = WorkflowState::new();
    let execution_id = state.execution_id.clone();

    info!(
      execution_id = %execution_id,
      steps = ?config.steps,
      output_dir = %config.output_dir.display(),
      dry_run = config.dry_run,
      "workflow_started"
    );
    self.notifier.notify(ExecutionEvent::WorkflowStarted {
      execution_id: execution_id.clone(),
      steps: config.steps.clone(),
      dry_run: config.dry_run,
    });

    for &step in &config.steps {
      if cancel.is_cancelled() {
        warn!(execution_id = %execution_id, step = %step, "workflow cancelled");
        state.finish();
        self.notifier.notify(ExecutionEvent::WorkflowFailed {
          execution_id: execution_id.clone(),
          error: "cancelled".to_string(),
        });
        return Err(WorkflowError::Cancelled {
          state: Box::new(state),
        });
      }

      info!(execution_id = %execution_id, step = %step, "step_started");
      self.notifier.notify(ExecutionEvent::StepStarted {
        execution_id: execution_id.clone(),
        step,
      });

      let outcome = if config.dry_run {
        self.progress(&execution_id, step, format!("[dry run] would run {step}"));
        Ok(StepOutput::dry_run(step))
      } else {
        self.run_step(step, config, &execution_id, &cancel).await
      };

      match outcome {
        Ok(output) => {
          info!(
            execution_id = %execution_id,
            step = %step,
            files = output.generated_files.len(),
            "step_completed"
          );
          self.notifier.notify(ExecutionEvent::StepCompleted {
            execution_id: execution_id.clone(),
            step,
            data: output.payload.clone(),
          });
          state.record_success(step, output);
        }
        Err(e) => {
          let message = e.to_string();
          error!(execution_id = %execution_id, step = %step, error = %message, "step_failed");
          self.notifier.notify(ExecutionEvent::StepFailed {
            execution_id: execution_id.clone(),
            step,
            error: message.clone(),
          });
          state.record_failure(step, message.clone());

          if !config.continue_on_error {
            state.finish();
            self.notifier.notify(ExecutionEvent::WorkflowFailed {
              execution_id: execution_id.clone(),
              error: format!("step '{step}' failed: {message}"),
            });
            return Err(WorkflowError::StepFailed {
              step,
              message,
              state: Box::new(state),
            });
          }
        }
      }
    }

    state.finish();
    info!(
      execution_id = %execution_id,
      completed = state.completed_steps.len(),
      failed = state.failed_steps.len(),
      files = state.generated_files.len(),
      "workflow_completed"
    );
    self.notifier.notify(ExecutionEvent::WorkflowCompleted {
      execution_id,
      completed: state.completed_steps.len(),
      failed: state.failed_steps.len(),
    });

    Ok(state)
  }

  pub(crate) fn progress(&self, execution_id: &str, step: WorkflowStep, message: String) {
    self.notifier.notify(ExecutionEvent::Progress {
      execution_id: execution_id.to_string(),
      step,
      message,
    });
  }
}
