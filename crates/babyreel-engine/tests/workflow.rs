use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use babyreel_config::{BatchConfig, BatchKind, InputParams, WorkflowConfig, WorkflowStep};
use babyreel_content::{ProviderError, Script, ScriptProvider, ScriptRequest, Taxonomy};
use babyreel_engine::{
  ChannelNotifier, EngineConfig, ExecutionEvent, Providers, WorkflowEngine, WorkflowError,
  WorkflowReport,
};
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct FailingScripts;

#[async_trait]
impl ScriptProvider for FailingScripts {
  async fn generate_script(&self, _request: &ScriptRequest) -> Result<Script, ProviderError> {
    Err(ProviderError::Generation("model unavailable".to_string()))
  }
}

struct SlowScripts;

#[async_trait]
impl ScriptProvider for SlowScripts {
  async fn generate_script(&self, _request: &ScriptRequest) -> Result<Script, ProviderError> {
    tokio::time::sleep(Duration::from_secs(600)).await;
    Ok(Script::default())
  }
}

fn providers() -> Providers {
  Providers::builtin(Arc::new(Taxonomy::builtin())).unwrap()
}

fn events(rx: &mut mpsc::UnboundedReceiver<ExecutionEvent>) -> Vec<ExecutionEvent> {
  let mut events = Vec::new();
  while let Ok(event) = rx.try_recv() {
    events.push(event);
  }
  events
}

#[tokio::test]
async fn script_failure_aborts_before_quality_check() {
  let dir = tempfile::tempdir().unwrap();
  let (tx, mut rx) = mpsc::unbounded_channel();
  let mut providers = providers();
  providers.scripts = Arc::new(FailingScripts);
  let engine = WorkflowEngine::with_notifier(providers, EngineConfig::default(), ChannelNotifier::new(tx));

  let config = WorkflowConfig::new(
    vec![WorkflowStep::GenerateScripts, WorkflowStep::QualityCheck],
    dir.path(),
  );

  let err = engine
    .execute(&config, CancellationToken::new())
    .await
    .unwrap_err();

  let WorkflowError::StepFailed { step, message, state } = err else {
    panic!("expected a step failure");
  };
  assert_eq!(step, WorkflowStep::GenerateScripts);
  assert_eq!(message, "generation failed: model unavailable");
  assert!(state.completed_steps.is_empty());
  assert_eq!(state.failed_steps.len(), 1);
  assert_eq!(state.failed_steps[0].step, WorkflowStep::GenerateScripts);
  assert!(state.end_time.is_some());
  assert!(state.quality_report.is_none());
  assert!(!state.results.contains_key("quality_check"));

  let started_quality = events(&mut rx).iter().any(|event| {
    matches!(event, ExecutionEvent::StepStarted { step: WorkflowStep::QualityCheck, .. })
  });
  assert!(!started_quality);
}

#[tokio::test]
async fn continue_on_error_records_every_failure() {
  let dir = tempfile::tempdir().unwrap();
  let mut providers = providers();
  providers.scripts = Arc::new(FailingScripts);
  let engine = WorkflowEngine::new(providers, EngineConfig::default());

  let mut config = WorkflowConfig::new(
    vec![
      WorkflowStep::GenerateScripts,
      WorkflowStep::QualityCheck,
      WorkflowStep::BatchProcess,
      WorkflowStep::CreateSchedule,
    ],
    dir.path(),
  );
  config.continue_on_error = true;
  config.params.start_date = NaiveDate::from_ymd_opt(2024, 6, 10);

  let state = engine.execute(&config, CancellationToken::new()).await.unwrap();

  let failed: Vec<WorkflowStep> = state.failed_steps.iter().map(|f| f.step).collect();
  assert_eq!(
    failed,
    vec![
      WorkflowStep::GenerateScripts,
      WorkflowStep::QualityCheck,
      WorkflowStep::BatchProcess
    ]
  );
  assert_eq!(state.completed_steps, vec![WorkflowStep::CreateSchedule]);
  assert_eq!(state.results["create_schedule"]["reminders"], 21);

  let report = WorkflowReport::from_state(&state);
  assert!(!report.success);
  assert_eq!(report.workflow_summary.failed_steps, 3);
}

#[tokio::test]
async fn default_pipeline_writes_every_artifact() {
  let dir = tempfile::tempdir().unwrap();
  let engine = WorkflowEngine::new(providers(), EngineConfig::default());

  let mut config = WorkflowConfig::default();
  config.output_dir = dir.path().to_path_buf();
  config.params.idea_count = 2;
  config.params.script_count = 2;
  config.params.custom.thumbnail = "thumb.png".to_string();

  let state = engine.execute(&config, CancellationToken::new()).await.unwrap();

  assert_eq!(state.completed_steps, WorkflowStep::DEFAULT_PIPELINE.to_vec());
  assert!(state.failed_steps.is_empty());
  for path in &state.generated_files {
    assert!(path.exists(), "missing {}", path.display());
  }

  let quality = state.quality_report.as_ref().unwrap();
  assert_eq!(quality.batch_summary.evaluated_scripts, 2);

  assert_eq!(state.metadata_results.len(), 2);
  assert!(state.metadata_results.iter().all(|m| m.custom_thumbnail == "thumb.png"));
  assert_eq!(state.results["generate_ideas"]["ideas_generated"], 2);

  // 2 ideas + 2 scripts + 1 quality report + 2 metadata files
  assert_eq!(state.generated_files.len(), 7);
  assert!(dir.path().join("metadata").is_dir());

  let report_path = WorkflowReport::from_state(&state).save(dir.path()).await.unwrap();
  assert!(report_path.exists());
}

#[tokio::test]
async fn idea_items_forced_through_script_batch_fail() {
  let dir = tempfile::tempdir().unwrap();
  let batch_path = dir.path().join("batch.json");
  let mut batch = BatchConfig::default_for(BatchKind::Ideas, 3);
  batch.max_workers = 2;
  tokio::fs::write(&batch_path, serde_json::to_string(&batch).unwrap())
    .await
    .unwrap();

  let engine = WorkflowEngine::new(providers(), EngineConfig::default());
  let mut config = WorkflowConfig::new(
    vec![WorkflowStep::BatchProcess, WorkflowStep::GenerateScripts, WorkflowStep::QualityCheck],
    dir.path().join("out"),
  );
  config.params.batch_file = Some(batch_path);

  let err = engine.execute(&config, CancellationToken::new()).await;
  // Idea items carry no subcategory, so forcing them through the script path fails.
  let WorkflowError::StepFailed { step, state, .. } = err.unwrap_err() else {
    panic!("expected a step failure");
  };
  assert_eq!(step, WorkflowStep::GenerateScripts);
  assert_eq!(state.completed_steps, vec![WorkflowStep::BatchProcess]);
  assert_eq!(state.results["batch_process"]["batch_summary"]["successful_items"], 3);
  assert!(dir.path().join("out/generated-ideas").is_dir());
}

#[tokio::test]
async fn script_batch_feeds_generate_scripts() {
  let dir = tempfile::tempdir().unwrap();
  let batch_path = dir.path().join("batch.json");
  let mut batch = BatchConfig::default_for(BatchKind::Scripts, 3);
  batch.max_workers = 2;
  tokio::fs::write(&batch_path, serde_json::to_string(&batch).unwrap())
    .await
    .unwrap();

  let engine = WorkflowEngine::new(providers(), EngineConfig::default());
  let mut config = WorkflowConfig::new(
    vec![WorkflowStep::GenerateScripts, WorkflowStep::QualityCheck],
    dir.path().join("out"),
  );
  config.params.batch_file = Some(batch_path);

  let state = engine.execute(&config, CancellationToken::new()).await.unwrap();

  assert_eq!(state.results["generate_scripts"]["scripts_generated"], 3);
  assert_eq!(state.results["generate_scripts"]["failed"], 0);
  let scripts: Vec<_> = state
    .generated_files
    .iter()
    .filter(|path| path.starts_with(config.script_dir()))
    .collect();
  assert_eq!(scripts.len(), 3);
  assert!(scripts.iter().all(|path| path.exists()));

  let quality = state.quality_report.as_ref().unwrap();
  assert_eq!(quality.batch_summary.evaluated_scripts, 3);
}

#[tokio::test]
async fn repeated_script_step_keeps_every_file() {
  let dir = tempfile::tempdir().unwrap();
  let engine = WorkflowEngine::new(providers(), EngineConfig::default());

  let mut config = WorkflowConfig::new(
    vec![
      WorkflowStep::GenerateScripts,
      WorkflowStep::GenerateScripts,
      WorkflowStep::QualityCheck,
    ],
    dir.path(),
  );
  config.params.script_count = 2;

  let state = engine.execute(&config, CancellationToken::new()).await.unwrap();

  let mut scripts: Vec<_> = state
    .generated_files
    .iter()
    .filter(|path| path.starts_with(config.script_dir()))
    .cloned()
    .collect();
  assert_eq!(scripts.len(), 4);
  scripts.sort();
  scripts.dedup();
  assert_eq!(scripts.len(), 4);
  assert!(scripts.iter().all(|path| path.exists()));

  let quality = state.quality_report.as_ref().unwrap();
  assert_eq!(quality.batch_summary.total_scripts, 4);
  assert_eq!(quality.batch_summary.evaluated_scripts, 4);
}

#[tokio::test]
async fn same_named_scripts_in_subdirectories_keep_their_metadata() {
  let dir = tempfile::tempdir().unwrap();
  let config = WorkflowConfig::new(vec![WorkflowStep::GenerateMetadata], dir.path());

  let script = providers()
    .scripts
    .generate_script(&ScriptRequest::from(&InputParams::default()))
    .await
    .unwrap();
  for week in ["week1", "week2"] {
    let week_dir = config.script_dir().join(week);
    tokio::fs::create_dir_all(&week_dir).await.unwrap();
    tokio::fs::write(
      week_dir.join("script_1_20240610_090000.json"),
      serde_json::to_vec_pretty(&script).unwrap(),
    )
    .await
    .unwrap();
  }

  let engine = WorkflowEngine::new(providers(), EngineConfig::default());
  let state = engine.execute(&config, CancellationToken::new()).await.unwrap();

  assert_eq!(state.metadata_results.len(), 2);
  let mut files = state.generated_files.clone();
  files.sort();
  files.dedup();
  assert_eq!(files.len(), 2);
  assert!(
    dir
      .path()
      .join("metadata/week1/script_1_20240610_090000_metadata.json")
      .exists()
  );
  assert!(
    dir
      .path()
      .join("metadata/week2/script_1_20240610_090000_metadata.json")
      .exists()
  );
}

#[tokio::test]
async fn dry_run_writes_nothing() {
  let dir = tempfile::tempdir().unwrap();
  let engine = WorkflowEngine::new(providers(), EngineConfig::default());

  let mut config = WorkflowConfig::new(WorkflowStep::ALL.to_vec(), dir.path().join("out"));
  config.dry_run = true;

  let state = engine.execute(&config, CancellationToken::new()).await.unwrap();
  assert_eq!(state.completed_steps, WorkflowStep::ALL.to_vec());
  assert_eq!(state.results["batch_process"]["dry_run"], true);
  assert!(state.generated_files.is_empty());
  assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn cancelled_run_stops_before_first_step() {
  let dir = tempfile::tempdir().unwrap();
  let engine = WorkflowEngine::new(providers(), EngineConfig::default());
  let cancel = CancellationToken::new();
  cancel.cancel();

  let err = engine
    .execute(&WorkflowConfig::new(vec![WorkflowStep::GenerateIdeas], dir.path()), cancel)
    .await
    .unwrap_err();

  assert!(matches!(err, WorkflowError::Cancelled { .. }));
  assert!(err.state().completed_steps.is_empty());
  assert!(err.state().end_time.is_some());
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out() {
  let dir = tempfile::tempdir().unwrap();
  let mut providers = providers();
  providers.scripts = Arc::new(SlowScripts);
  let engine = WorkflowEngine::new(
    providers,
    EngineConfig {
      provider_timeout: Duration::from_secs(5),
    },
  );

  let err = engine
    .execute(
      &WorkflowConfig::new(vec![WorkflowStep::GenerateScripts], dir.path()),
      CancellationToken::new(),
    )
    .await
    .unwrap_err();

  let WorkflowError::StepFailed { message, .. } = err else {
    panic!("expected a step failure");
  };
  assert_eq!(message, "provider call timed out after 5s");
}

#[tokio::test]
async fn weekly_plan_and_schedule() {
  let dir = tempfile::tempdir().unwrap();
  let engine = WorkflowEngine::new(providers(), EngineConfig::default());

  let mut config = WorkflowConfig::new(
    vec![WorkflowStep::GenerateIdeas, WorkflowStep::CreateSchedule],
    dir.path(),
  );
  config.params.weekly_plan = true;
  config.params.start_date = NaiveDate::from_ymd_opt(2024, 6, 10);

  let state = engine.execute(&config, CancellationToken::new()).await.unwrap();
  assert_eq!(state.results["generate_ideas"]["days"], 7);
  assert_eq!(state.results["create_schedule"]["entries"], 7);
  assert_eq!(state.generated_files.len(), 2);
}
