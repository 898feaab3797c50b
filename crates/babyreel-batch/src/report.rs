use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::result::BatchResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
  pub total_items: usize,
  pub successful_items: usize,
  pub failed_items: usize,
  /// Percentage of successful items, 0 for an empty batch.
  pub success_rate: f64,
  /// Wall-clock seconds.
  pub processing_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
  pub error_count: usize,
  /// Distinct messages, sorted.
  pub error_messages: Vec<String>,
}

/// Aggregate view of a finished batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
  pub batch_summary: BatchSummary,
  pub successful_results: Vec<BatchResult>,
  pub failed_results: Vec<BatchResult>,
  pub file_list: Vec<PathBuf>,
  pub error_summary: ErrorSummary,
  pub generated_at: DateTime<Local>,
}

impl BatchReport {
  pub fn from_results(results: &[BatchResult], processing_time: Duration) -> Self {
    let (successful_results, failed_results): (Vec<BatchResult>, Vec<BatchResult>) =
      results.iter().cloned().partition(BatchResult::is_success);

    let total_items = results.len();
    let success_rate = if total_items == 0 {
      0.0
    } else {
      successful_results.len() as f64 / total_items as f64 * 100.0
    };

    let file_list = successful_results
      .iter()
      .filter_map(|result| result.filepath.clone())
      .collect();

    let error_messages: BTreeSet<String> = failed_results
      .iter()
      .map(|result| result.message.clone())
      .collect();

    Self {
      batch_summary: BatchSummary {
        total_items,
        successful_items: successful_results.len(),
        failed_items: failed_results.len(),
        success_rate,
        processing_time: processing_time.as_secs_f64(),
      },
      error_summary: ErrorSummary {
        error_count: failed_results.len(),
        error_messages: error_messages.into_iter().collect(),
      },
      successful_results,
      failed_results,
      file_list,
      generated_at: Local::now(),
    }
  }

  pub fn success_rate(&self) -> f64 {
    self.batch_summary.success_rate
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use babyreel_config::WorkItem;

  #[test]
  fn test_empty_batch_has_zero_rate() {
    let report = BatchReport::from_results(&[], Duration::ZERO);
    assert_eq!(report.batch_summary.total_items, 0);
    assert_eq!(report.success_rate(), 0.0);
    assert!(report.error_summary.error_messages.is_empty());
  }

  #[test]
  fn test_counts_and_unique_messages() {
    let results = vec![
      BatchResult::success(1, WorkItem::default(), PathBuf::from("out/a.json"), "ok".into()),
      BatchResult::error(2, WorkItem::default(), "boom".into()),
      BatchResult::error(3, WorkItem::default(), "boom".into()),
      BatchResult::error(4, WorkItem::default(), "another".into()),
    ];

    let report = BatchReport::from_results(&results, Duration::from_millis(1500));
    assert_eq!(report.batch_summary.successful_items, 1);
    assert_eq!(report.batch_summary.failed_items, 3);
    assert_eq!(report.success_rate(), 25.0);
    assert_eq!(report.batch_summary.processing_time, 1.5);
    assert_eq!(report.file_list, vec![PathBuf::from("out/a.json")]);
    assert_eq!(report.error_summary.error_count, 3);
    assert_eq!(report.error_summary.error_messages, vec!["another", "boom"]);
    assert_eq!(report.successful_results[0].filename.as_deref(), Some("a.json"));
  }
}
