//! Babyreel Artifact
//!
//! Every output of a run (ideas, scripts, metadata, reports) is an artifact
//! stored under a key relative to the run's output directory, such as
//! `scripts/script_1_20240610_090000.json`.
//!
//! The [`Store`] trait is the storage backend. [`JsonStore`] layers pretty
//! JSON encoding on top of any store, and [`naming`] derives the keys.

mod fs;
pub mod naming;

pub use fs::FsStore;

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Keyed byte storage for run outputs.
///
/// Stores never replace an artifact. When `key` is taken the artifact is
/// written under the next free numbered variant (see [`naming::numbered`]),
/// so every call yields a distinct location.
#[async_trait]
pub trait Store: Send + Sync {
  /// Returns the location the artifact was written to.
  async fn put(&self, key: &str, data: Bytes) -> Result<PathBuf, Error>;
}

/// JSON encoding for any [`Store`].
#[async_trait]
pub trait JsonStore: Store {
  /// Store `value` as pretty-printed JSON.
  async fn put_json<T>(&self, key: &str, value: &T) -> Result<PathBuf, Error>
  where
    T: Serialize + Sync + ?Sized,
  {
    let data = serde_json::to_vec_pretty(value)?;
    self.put(key, Bytes::from(data)).await
  }
}

impl<S: Store + ?Sized> JsonStore for S {}
