use std::path::Path;

use babyreel_config::BatchConfig;
use tracing::debug;

use crate::error::BatchError;

/// Read and validate a batch configuration file.
pub async fn load_batch_config(path: &Path) -> Result<BatchConfig, BatchError> {
  let content = tokio::fs::read_to_string(path).await.map_err(|source| {
    if source.kind() == std::io::ErrorKind::NotFound {
      BatchError::NotFound(path.to_path_buf())
    } else {
      BatchError::Read {
        path: path.to_path_buf(),
        source,
      }
    }
  })?;

  let config = BatchConfig::from_json(&content)?;
  debug!(
    path = %path.display(),
    kind = %config.kind,
    items = config.items.len(),
    "batch_config_loaded"
  );
  Ok(config)
}
