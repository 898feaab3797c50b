//! Step handlers.
//!
//! Each handler reads the run configuration, calls providers, writes its
//! artifacts and returns a [`StepOutput`] for the engine to fold into the
//! workflow state.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use babyreel_artifact::naming::{item_key, report_key, timestamp};
use babyreel_artifact::{FsStore, JsonStore};
use babyreel_batch::{BatchReport, BatchRunner, GenerationItemHandler, load_batch_config};
use babyreel_config::{BatchConfig, BatchKind, WorkflowConfig, WorkflowStep};
use babyreel_content::{
  BatchEvaluation, IdeaRequest, ProviderError, ScriptRequest, VideoMetadata, json_files,
  read_script,
};
use babyreel_schedule::ScheduleBuilder;
use chrono::{Local, NaiveDate};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::engine::WorkflowEngine;
use crate::error::StepError;
use crate::events::ExecutionNotifier;

/// What a successful step hands back to the engine.
#[derive(Debug, Default)]
pub struct StepOutput {
  pub payload: serde_json::Value,
  pub generated_files: Vec<PathBuf>,
  pub quality_report: Option<BatchEvaluation>,
  pub metadata: Vec<VideoMetadata>,
}

impl StepOutput {
  fn new(payload: serde_json::Value, generated_files: Vec<PathBuf>) -> Self {
    Self {
      payload,
      generated_files,
      ..Self::default()
    }
  }

  pub(crate) fn dry_run(step: WorkflowStep) -> Self {
    Self::new(json!({ "dry_run": true, "step": step }), Vec::new())
  }
}

impl<N: ExecutionNotifier> WorkflowEngine<N> {
  pub(crate) async fn run_step(
    &self,
    step: WorkflowStep,
    config: &WorkflowConfig,
    execution_id: &str,
    cancel: &CancellationToken,
  ) -> Result<StepOutput, StepError> {
    match step {
      WorkflowStep::GenerateIdeas => self.generate_ideas(config, execution_id).await,
      WorkflowStep::GenerateScripts => self.generate_scripts(config, execution_id, cancel).await,
      WorkflowStep::QualityCheck => self.quality_check(config, execution_id).await,
      WorkflowStep::GenerateMetadata => self.generate_metadata(config, execution_id).await,
      WorkflowStep::BatchProcess => self.batch_process(config, execution_id, cancel).await,
      WorkflowStep::CreateSchedule => self.create_schedule(config, execution_id).await,
    }
  }

  /// Bound a provider call by the configured timeout.
  async fn timed<T>(
    &self,
    call: impl Future<Output = Result<T, ProviderError>>,
  ) -> Result<T, StepError> {
    let limit = self.config.provider_timeout;
    match tokio::time::timeout(limit, call).await {
      Ok(result) => Ok(result?),
      Err(_) => Err(StepError::Timeout(limit)),
    }
  }

  async fn generate_ideas(
    &self,
    config: &WorkflowConfig,
    execution_id: &str,
  ) -> Result<StepOutput, StepError> {
    let params = &config.params;
    let store = FsStore::new(&config.output_dir);
    let ts = timestamp(Local::now());

    if params.weekly_plan {
      let start = params.start_date.unwrap_or_else(today);
      let plan = self.timed(self.providers.ideas.weekly_plan(start)).await?;
      let path = store.put_json(&format!("weekly_plan_{ts}.json"), &plan).await?;
      self.progress(
        execution_id,
        WorkflowStep::GenerateIdeas,
        format!("Weekly plan for {} to {} saved", plan.week_start, plan.week_end),
      );
      return Ok(StepOutput::new(
        json!({
          "weekly_plan": path,
          "week_start": plan.week_start,
          "days": plan.content_schedule.len(),
        }),
        vec![path],
      ));
    }

    let request = IdeaRequest::from(params);
    let requested = params.idea_count;
    let mut files = Vec::with_capacity(requested);

    for index in 1..=requested {
      match self.timed(self.providers.ideas.generate_idea(&request)).await {
        Ok(idea) => {
          let key = format!("ideas/{}", item_key("idea", index, &ts));
          let path = store.put_json(&key, &idea).await?;
          self.progress(
            execution_id,
            WorkflowStep::GenerateIdeas,
            format!("Generated idea {index}/{requested}: {}", idea.suggested_title),
          );
          files.push(path);
        }
        Err(e) => {
          warn!(execution_id, index, error = %e, "idea_generation_failed");
        }
      }
    }

    if files.is_empty() && requested > 0 {
      return Err(StepError::NoIdeasGenerated { requested });
    }

    Ok(StepOutput::new(
      json!({
        "ideas_generated": files.len(),
        "requested": requested,
        "files": files,
      }),
      files,
    ))
  }

  async fn generate_scripts(
    &self,
    config: &WorkflowConfig,
    execution_id: &str,
    cancel: &CancellationToken,
  ) -> Result<StepOutput, StepError> {
    let params = &config.params;
    let script_dir = config.script_dir();

    if let Some(batch_file) = &params.batch_file {
      let mut batch = load_batch_config(batch_file).await?;
      batch.kind = BatchKind::Scripts;
      let report = self
        .run_batch(&batch, &script_dir, execution_id, WorkflowStep::GenerateScripts, cancel)
        .await;

      if report.batch_summary.successful_items == 0 {
        return Err(StepError::BatchFailed {
          failed: report.batch_summary.failed_items,
        });
      }

      return Ok(StepOutput::new(
        json!({
          "scripts_generated": report.batch_summary.successful_items,
          "failed": report.batch_summary.failed_items,
          "batch_file": batch_file,
          "files": report.file_list,
        }),
        report.file_list,
      ));
    }

    let store = FsStore::new(&script_dir);
    let request = ScriptRequest::from(params);
    let ts = timestamp(Local::now());
    let mut files = Vec::with_capacity(params.script_count);

    for index in 1..=params.script_count {
      let script = self.timed(self.providers.scripts.generate_script(&request)).await?;
      let path = store.put_json(&item_key("script", index, &ts), &script).await?;
      self.progress(
        execution_id,
        WorkflowStep::GenerateScripts,
        format!("Generated script {index}/{}: {}", params.script_count, script.script.title),
      );
      files.push(path);
    }

    Ok(StepOutput::new(
      json!({
        "scripts_generated": files.len(),
        "pillar": request.pillar,
        "subcategory": request.subcategory,
        "files": files,
      }),
      files,
    ))
  }

  async fn quality_check(
    &self,
    config: &WorkflowConfig,
    execution_id: &str,
  ) -> Result<StepOutput, StepError> {
    let script_dir = config.script_dir();
    let evaluation = self
      .timed(self.providers.quality.evaluate_dir(&script_dir))
      .await?;

    let store = FsStore::new(&config.output_dir);
    let path = store
      .put_json(&report_key("quality", &timestamp(Local::now())), &evaluation)
      .await?;

    let summary = &evaluation.batch_summary;
    self.progress(
      execution_id,
      WorkflowStep::QualityCheck,
      format!(
        "Evaluated {} of {} scripts, average score {:.1}",
        summary.evaluated_scripts, summary.total_scripts, summary.average_score
      ),
    );

    Ok(StepOutput {
      payload: json!({
        "total_scripts": summary.total_scripts,
        "evaluated_scripts": summary.evaluated_scripts,
        "average_score": summary.average_score,
        "grade_distribution": summary.grade_distribution,
        "report": path,
      }),
      generated_files: vec![path],
      quality_report: Some(evaluation),
      metadata: Vec::new(),
    })
  }

  async fn generate_metadata(
    &self,
    config: &WorkflowConfig,
    execution_id: &str,
  ) -> Result<StepOutput, StepError> {
    let script_dir = config.script_dir();
    if !tokio::fs::metadata(&script_dir).await.is_ok_and(|m| m.is_dir()) {
      return Err(ProviderError::DirectoryNotFound(script_dir).into());
    }

    let store = FsStore::new(&config.output_dir);
    let mut files = Vec::new();
    let mut metadata_results = Vec::new();

    for path in json_files(&script_dir).await? {
      let script = match read_script(&path).await {
        Ok(script) if script.script.full_text().is_empty() => {
          debug!(execution_id, path = %path.display(), "skipping file without script sections");
          continue;
        }
        Ok(script) => script,
        Err(e) => {
          warn!(execution_id, path = %path.display(), error = %e, "skipping unreadable script");
          continue;
        }
      };

      let mut metadata = self
        .timed(self.providers.metadata.generate_metadata(&script))
        .await?;
      metadata.custom_thumbnail = config.params.custom.thumbnail.clone();

      let written = store
        .put_json(&metadata_key(&script_dir, &path), &metadata)
        .await?;
      self.progress(
        execution_id,
        WorkflowStep::GenerateMetadata,
        format!("Metadata for {}: {}", file_stem(&path), metadata.title),
      );
      files.push(written);
      metadata_results.push(metadata);
    }

    Ok(StepOutput {
      payload: json!({
        "metadata_generated": metadata_results.len(),
        "files": files,
      }),
      generated_files: files,
      quality_report: None,
      metadata: metadata_results,
    })
  }

  async fn batch_process(
    &self,
    config: &WorkflowConfig,
    execution_id: &str,
    cancel: &CancellationToken,
  ) -> Result<StepOutput, StepError> {
    let batch_file = config
      .params
      .batch_file
      .as_ref()
      .ok_or(StepError::MissingBatchFile)?;
    let batch = load_batch_config(batch_file).await?;

    let output_dir = match (&batch.output_dir, batch.kind) {
      (Some(dir), _) => config.output_dir.join(dir),
      (None, BatchKind::Scripts) => config.script_dir(),
      (None, BatchKind::Ideas) => config.output_dir.join("ideas"),
    };

    let report = self
      .run_batch(&batch, &output_dir, execution_id, WorkflowStep::BatchProcess, cancel)
      .await;

    let store = FsStore::new(&config.output_dir);
    let report_path = store
      .put_json(&report_key("batch", &timestamp(Local::now())), &report)
      .await?;

    let mut files = report.file_list.clone();
    files.push(report_path.clone());

    Ok(StepOutput::new(
      json!({
        "type": batch.kind,
        "batch_summary": report.batch_summary,
        "error_summary": report.error_summary,
        "report": report_path,
      }),
      files,
    ))
  }

  async fn create_schedule(
    &self,
    config: &WorkflowConfig,
    execution_id: &str,
  ) -> Result<StepOutput, StepError> {
    let start = config.params.start_date.unwrap_or_else(today);
    let plan = self.timed(self.providers.ideas.weekly_plan(start)).await?;
    let schedule = ScheduleBuilder::new().build(&plan)?;

    let store = FsStore::new(&config.output_dir);
    let path = store
      .put_json(&format!("content_schedule_{}.json", timestamp(Local::now())), &schedule)
      .await?;
    self.progress(
      execution_id,
      WorkflowStep::CreateSchedule,
      format!(
        "Schedule for {} to {} with {} reminders",
        schedule.week_start,
        schedule.week_end,
        schedule.reminders.len()
      ),
    );

    Ok(StepOutput::new(
      json!({
        "schedule": path,
        "week_start": schedule.week_start,
        "entries": schedule.content_calendar.len(),
        "reminders": schedule.reminders.len(),
      }),
      vec![path],
    ))
  }

  async fn run_batch(
    &self,
    batch: &BatchConfig,
    output_dir: &Path,
    execution_id: &str,
    step: WorkflowStep,
    cancel: &CancellationToken,
  ) -> BatchReport {
    let handler = GenerationItemHandler::new(
      batch.kind,
      self.providers.ideas.clone(),
      self.providers.scripts.clone(),
      Arc::new(FsStore::new(output_dir)),
      timestamp(Local::now()),
    );

    let report = BatchRunner::from_config(batch)
      .with_item_timeout(self.config.provider_timeout)
      .run(batch.items.clone(), Arc::new(handler), cancel)
      .await;

    self.progress(
      execution_id,
      step,
      format!(
        "Batch finished: {}/{} items succeeded ({:.1}%)",
        report.batch_summary.successful_items,
        report.batch_summary.total_items,
        report.success_rate()
      ),
    );
    report
  }
}

fn today() -> NaiveDate {
  Local::now().date_naive()
}

fn file_stem(path: &Path) -> String {
  path
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_default()
}

/// `metadata/<dir below script_dir>/<stem>_metadata.json`, so scripts that
/// share a name in different subdirectories keep separate metadata.
fn metadata_key(script_dir: &Path, script: &Path) -> String {
  let name = format!("{}_metadata.json", file_stem(script));
  let relative_dir = script
    .strip_prefix(script_dir)
    .ok()
    .and_then(Path::parent)
    .filter(|dir| !dir.as_os_str().is_empty());

  match relative_dir {
    Some(dir) => Path::new("metadata")
      .join(dir)
      .join(name)
      .to_string_lossy()
      .into_owned(),
    None => format!("metadata/{name}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_metadata_key_keeps_subdirectories() {
    let dir = Path::new("out/scripts");
    assert_eq!(
      metadata_key(dir, &dir.join("script_1.json")),
      "metadata/script_1_metadata.json"
    );
    assert_eq!(
      metadata_key(dir, &dir.join("week1/script_1.json")),
      Path::new("metadata/week1/script_1_metadata.json").to_string_lossy()
    );
    assert_ne!(
      metadata_key(dir, &dir.join("week1/script_1.json")),
      metadata_key(dir, &dir.join("week2/script_1.json"))
    );
  }

  #[test]
  fn test_metadata_key_outside_script_dir_uses_file_name() {
    assert_eq!(
      metadata_key(Path::new("out/scripts"), Path::new("elsewhere/a/script_9.json")),
      "metadata/script_9_metadata.json"
    );
  }
}
