use std::path::PathBuf;

use babyreel_config::WorkItem;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
  Success,
  Error,
}

/// Outcome of one executed work item.
///
/// `filename` and `filepath` are present exactly when the item succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
  pub status: BatchStatus,
  /// 1-based position of the item in the batch.
  pub index: usize,
  pub item: WorkItem,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filename: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filepath: Option<PathBuf>,
  pub timestamp: DateTime<Local>,
  pub message: String,
}

impl BatchResult {
  pub fn success(index: usize, item: WorkItem, filepath: PathBuf, message: String) -> Self {
    let filename = filepath
      .file_name()
      .map(|name| name.to_string_lossy().into_owned());
    Self {
      status: BatchStatus::Success,
      index,
      item,
      filename,
      filepath: Some(filepath),
      timestamp: Local::now(),
      message,
    }
  }

  pub fn error(index: usize, item: WorkItem, message: String) -> Self {
    Self {
      status: BatchStatus::Error,
      index,
      item,
      filename: None,
      filepath: None,
      timestamp: Local::now(),
      message,
    }
  }

  pub fn is_success(&self) -> bool {
    self.status == BatchStatus::Success
  }
}
