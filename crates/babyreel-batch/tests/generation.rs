use std::sync::Arc;

use babyreel_artifact::FsStore;
use babyreel_batch::{BatchRunner, BatchStatus, GenerationItemHandler};
use babyreel_config::{BatchConfig, BatchKind, WorkItem};
use babyreel_content::{Script, Taxonomy, TemplateIdeaGenerator, TemplateScriptGenerator};
use tokio_util::sync::CancellationToken;

fn handler(kind: BatchKind, dir: &std::path::Path) -> Arc<GenerationItemHandler> {
  let taxonomy = Arc::new(Taxonomy::builtin());
  Arc::new(GenerationItemHandler::new(
    kind,
    Arc::new(TemplateIdeaGenerator::with_seed(taxonomy.clone(), 3)),
    Arc::new(TemplateScriptGenerator::new(taxonomy)),
    Arc::new(FsStore::new(dir)),
    "20240610_090000",
  ))
}

#[tokio::test]
async fn ideas_batch_with_one_failure_reports_eighty_percent() {
  let dir = tempfile::tempdir().unwrap();
  let mut items = BatchConfig::default_for(BatchKind::Ideas, 5).items;
  items[2] = WorkItem {
    title: Some("broken".to_string()),
    pillar: Some("pillar_9_unknown".to_string()),
    ..WorkItem::default()
  };

  let report = BatchRunner::new(2, true)
    .run(items, handler(BatchKind::Ideas, dir.path()), &CancellationToken::new())
    .await;

  assert_eq!(report.batch_summary.total_items, 5);
  assert_eq!(report.batch_summary.successful_items, 4);
  assert_eq!(report.success_rate(), 80.0);
  assert_eq!(
    report.error_summary.error_messages,
    vec!["Error generating idea: invalid pillar: pillar_9_unknown"]
  );
  assert_eq!(report.failed_results[0].index, 3);
  assert_eq!(report.failed_results[0].status, BatchStatus::Error);
  assert!(report.failed_results[0].filepath.is_none());

  assert_eq!(report.file_list.len(), 4);
  for path in &report.file_list {
    assert!(path.exists());
  }
  assert!(dir.path().join("idea_1_20240610_090000.json").exists());
}

#[tokio::test]
async fn scripts_batch_writes_named_files() {
  let dir = tempfile::tempdir().unwrap();
  let mut items = BatchConfig::default_for(BatchKind::Scripts, 2).items;
  items[1].filename = Some("custom_episode".to_string());

  let results = BatchRunner::new(2, true)
    .process(items, handler(BatchKind::Scripts, dir.path()), &CancellationToken::new())
    .await;

  assert!(results.iter().all(|r| r.is_success()));
  assert!(dir.path().join("script_1_20240610_090000.json").exists());

  let custom = dir.path().join("custom_episode.json");
  let script: Script = serde_json::from_str(&tokio::fs::read_to_string(&custom).await.unwrap()).unwrap();
  assert_eq!(script.metadata.title.as_deref(), Some("Sample script 2"));
  assert_eq!(script.metadata.subcategory, "morning_routine_magic");
}

#[tokio::test]
async fn script_item_without_subcategory_fails() {
  let dir = tempfile::tempdir().unwrap();
  let items = vec![WorkItem {
    pillar: Some("pillar_2_daily_adventures".to_string()),
    ..WorkItem::default()
  }];

  let results = BatchRunner::default()
    .process(items, handler(BatchKind::Scripts, dir.path()), &CancellationToken::new())
    .await;

  assert_eq!(results.len(), 1);
  assert_eq!(
    results[0].message,
    "Error processing item: missing required parameter 'subcategory'"
  );
}
