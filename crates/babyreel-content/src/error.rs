use std::path::PathBuf;

/// Errors raised by content providers.
///
/// Callers treat every variant as a recoverable, per-call failure.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
  #[error("invalid pillar: {0}")]
  InvalidPillar(String),

  #[error("category '{category}' not found in pillar '{pillar}'")]
  UnknownCategory { pillar: String, category: String },

  #[error("subcategory '{subcategory}' not found in pillar '{pillar}'")]
  UnknownSubcategory { pillar: String, subcategory: String },

  #[error("missing required parameter '{0}'")]
  MissingParameter(&'static str),

  #[error("pillar '{pillar}' has no categories")]
  EmptyPillar { pillar: String },

  #[error("template error: {0}")]
  Template(#[from] minijinja::Error),

  #[error("invalid pattern: {0}")]
  Pattern(#[from] regex::Error),

  #[error("directory not found: {}", .0.display())]
  DirectoryNotFound(PathBuf),

  #[error("directory scan failed: {0}")]
  Scan(#[from] tokio::task::JoinError),

  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid json: {0}")]
  Json(#[from] serde_json::Error),

  /// Generic failure reported by a backend.
  #[error("generation failed: {0}")]
  Generation(String),
}
