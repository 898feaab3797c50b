use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::naming::numbered;
use crate::{Error, Store};

/// Stores artifacts as plain files below a base directory.
///
/// Each artifact is stored at `{base_path}/{key}`. Parent directories are
/// created automatically.
#[derive(Debug, Clone)]
pub struct FsStore {
  base_path: PathBuf,
}

impl FsStore {
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  fn key_to_path(&self, key: &str) -> PathBuf {
    self.base_path.join(key)
  }
}

#[async_trait]
impl Store for FsStore {
  async fn put(&self, key: &str, data: Bytes) -> Result<PathBuf, Error> {
    let mut attempt = 1;
    loop {
      let path = self.key_to_path(&numbered(key, attempt));
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
      }

      // create_new makes the claim atomic across concurrent writers.
      match OpenOptions::new().write(true).create_new(true).open(&path).await {
        Ok(mut file) => {
          file.write_all(&data).await?;
          file.flush().await?;
          return Ok(path);
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
        Err(e) => return Err(e.into()),
      }
    }
  }
}
