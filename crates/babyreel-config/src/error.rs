//! Configuration error types.

/// Errors raised while building or validating configuration.
///
/// All of these are fatal: they abort a run before any work starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The configuration document is not valid JSON or has the wrong shape.
  #[error("invalid configuration: {0}")]
  Parse(#[from] serde_json::Error),

  /// The batch configuration has no `items` key.
  #[error("batch configuration must contain 'items' key")]
  MissingItems,

  /// The batch configuration has an empty `items` list.
  #[error("batch configuration must contain at least one item")]
  EmptyItems,

  /// The batch `type` is not one of the supported kinds.
  #[error("unknown process type: {0}")]
  UnknownBatchType(String),

  /// A workflow step name could not be recognized.
  #[error("unknown workflow step: {0}")]
  UnknownStep(String),

  /// A log level name could not be recognized.
  #[error("unknown log level: {0}")]
  UnknownLogLevel(String),

  /// Worker pools need at least one worker.
  #[error("max_workers must be at least 1, got {0}")]
  InvalidMaxWorkers(usize),
}
