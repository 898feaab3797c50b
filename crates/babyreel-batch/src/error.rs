use std::path::PathBuf;
use std::time::Duration;

use babyreel_config::ConfigError;
use babyreel_content::ProviderError;

/// Errors loading a batch configuration. These abort the batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
  #[error("batch configuration file not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Failure of a single work item. Recorded in its result, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
  #[error("Error processing item: {0}")]
  Script(#[source] ProviderError),

  #[error("Error generating idea: {0}")]
  Idea(#[source] ProviderError),

  #[error("Error writing output: {0}")]
  Artifact(#[from] babyreel_artifact::Error),

  #[error("Error processing item: timed out after {}s", .0.as_secs())]
  Timeout(Duration),
}
