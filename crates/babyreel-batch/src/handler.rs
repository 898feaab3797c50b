use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use babyreel_artifact::naming::{ensure_json_extension, item_key};
use babyreel_artifact::{JsonStore, Store};
use babyreel_config::{BatchKind, WorkItem};
use babyreel_content::{IdeaProvider, IdeaRequest, ScriptProvider, ScriptRequest};

use crate::error::HandlerError;

/// What a successful item produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutput {
  pub filepath: PathBuf,
  pub message: String,
}

/// Processes one work item.
///
/// Implementations must be safe to call concurrently for distinct items and
/// must write to a distinct location per item.
#[async_trait]
pub trait ItemHandler: Send + Sync + 'static {
  async fn handle(&self, index: usize, item: &WorkItem) -> Result<ItemOutput, HandlerError>;
}

/// Generates a script or an idea per item and stores it as JSON.
///
/// Files are named `{script|idea}_{index}_{timestamp}.json` unless the item
/// names its own file.
pub struct GenerationItemHandler {
  kind: BatchKind,
  ideas: Arc<dyn IdeaProvider>,
  scripts: Arc<dyn ScriptProvider>,
  store: Arc<dyn Store>,
  timestamp: String,
}

impl GenerationItemHandler {
  pub fn new(
    kind: BatchKind,
    ideas: Arc<dyn IdeaProvider>,
    scripts: Arc<dyn ScriptProvider>,
    store: Arc<dyn Store>,
    timestamp: impl Into<String>,
  ) -> Self {
    Self {
      kind,
      ideas,
      scripts,
      store,
      timestamp: timestamp.into(),
    }
  }

  fn key(&self, index: usize, item: &WorkItem) -> String {
    match &item.filename {
      Some(name) => ensure_json_extension(name),
      None => item_key(self.kind.file_prefix(), index, &self.timestamp),
    }
  }
}

#[async_trait]
impl ItemHandler for GenerationItemHandler {
  async fn handle(&self, index: usize, item: &WorkItem) -> Result<ItemOutput, HandlerError> {
    let key = self.key(index, item);

    let filepath = match self.kind {
      BatchKind::Scripts => {
        let request = ScriptRequest::try_from(item).map_err(HandlerError::Script)?;
        let mut script = self
          .scripts
          .generate_script(&request)
          .await
          .map_err(HandlerError::Script)?;
        if script.metadata.title.is_none() {
          script.metadata.title = item.title.clone();
        }
        self.store.put_json(&key, &script).await?
      }
      BatchKind::Ideas => {
        let idea = self
          .ideas
          .generate_idea(&IdeaRequest::from(item))
          .await
          .map_err(HandlerError::Idea)?;
        self.store.put_json(&key, &idea).await?
      }
    };

    Ok(ItemOutput {
      filepath,
      message: format!("Generated {} for '{}'", self.kind.file_prefix(), item.label()),
    })
  }
}
