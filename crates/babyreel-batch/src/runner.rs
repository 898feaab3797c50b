use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use babyreel_config::{BatchConfig, DEFAULT_MAX_WORKERS, WorkItem};
use futures::FutureExt;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::HandlerError;
use crate::handler::ItemHandler;
use crate::report::BatchReport;
use crate::result::BatchResult;

/// Bounded worker pool for independent work items.
#[derive(Debug, Clone)]
pub struct BatchRunner {
  max_workers: usize,
  continue_on_error: bool,
  item_timeout: Option<Duration>,
}

impl Default for BatchRunner {
  fn default() -> Self {
    Self::new(DEFAULT_MAX_WORKERS, true)
  }
}

impl BatchRunner {
  /// `max_workers` is clamped to at least one.
  pub fn new(max_workers: usize, continue_on_error: bool) -> Self {
    Self {
      max_workers: max_workers.max(1),
      continue_on_error,
      item_timeout: None,
    }
  }

  pub fn from_config(config: &BatchConfig) -> Self {
    Self::new(config.max_workers, config.continue_on_error)
  }

  /// Fail items whose handler runs longer than `timeout`.
  pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
    self.item_timeout = Some(timeout);
    self
  }

  pub fn max_workers(&self) -> usize {
    self.max_workers
  }

  /// Run `items` through `handler` and return one result per executed item.
  ///
  /// Results arrive in completion order. Items never submitted, because of an
  /// earlier error without `continue_on_error` or because `cancel` fired,
  /// produce no result.
  pub async fn process<H: ItemHandler>(
    &self,
    items: Vec<WorkItem>,
    handler: Arc<H>,
    cancel: &CancellationToken,
  ) -> Vec<BatchResult> {
    let total = items.len();
    let mut pending = items.into_iter().enumerate();
    let mut in_flight = JoinSet::new();
    let mut results = Vec::with_capacity(total);
    let mut stopped = false;

    info!(total, max_workers = self.max_workers, "batch_started");

    loop {
      while !stopped && in_flight.len() < self.max_workers {
        if cancel.is_cancelled() {
          warn!(submitted = results.len() + in_flight.len(), total, "batch_cancelled");
          stopped = true;
          break;
        }
        let Some((position, item)) = pending.next() else {
          break;
        };
        let handler = handler.clone();
        let timeout = self.item_timeout;
        in_flight.spawn(run_item(handler, position + 1, item, timeout));
      }

      let Some(joined) = in_flight.join_next().await else {
        break;
      };

      let result = match joined {
        Ok(result) => result,
        Err(e) => {
          // Items catch their own panics, so this only happens on runtime shutdown.
          error!(error = %e, "batch worker lost");
          continue;
        }
      };

      if result.is_success() {
        debug!(index = result.index, "item_completed");
      } else {
        warn!(index = result.index, error = %result.message, "item_failed");
        if !self.continue_on_error && !stopped {
          info!(index = result.index, "stopping batch after first error");
          stopped = true;
        }
      }

      results.push(result);
    }

    info!(
      total,
      executed = results.len(),
      failed = results.iter().filter(|r| !r.is_success()).count(),
      "batch_completed"
    );
    results
  }

  /// [`process`](Self::process) plus a timed report.
  pub async fn run<H: ItemHandler>(
    &self,
    items: Vec<WorkItem>,
    handler: Arc<H>,
    cancel: &CancellationToken,
  ) -> BatchReport {
    let started = Instant::now();
    let results = self.process(items, handler, cancel).await;
    BatchReport::from_results(&results, started.elapsed())
  }
}

async fn run_item<H: ItemHandler>(
  handler: Arc<H>,
  index: usize,
  item: WorkItem,
  timeout: Option<Duration>,
) -> BatchResult {
  let work = AssertUnwindSafe(async {
    match timeout {
      Some(limit) => tokio::time::timeout(limit, handler.handle(index, &item))
        .await
        .unwrap_or(Err(HandlerError::Timeout(limit))),
      None => handler.handle(index, &item).await,
    }
  })
  .catch_unwind()
  .await;

  match work {
    Ok(Ok(output)) => BatchResult::success(index, item, output.filepath, output.message),
    Ok(Err(e)) => BatchResult::error(index, item, e.to_string()),
    Err(panic) => BatchResult::error(
      index,
      item,
      format!("Unexpected error: {}", panic_message(panic.as_ref())),
    ),
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "worker panicked".to_string()
  }
}
