use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use babyreel_artifact::naming::{report_key, timestamp};
use babyreel_artifact::{FsStore, JsonStore};
use babyreel_batch::{BatchRunner, GenerationItemHandler, load_batch_config};
use babyreel_config::{
  BatchConfig, BatchKind, DEFAULT_OUTPUT_DIR, InputParams, LogLevel, StepFlags, WorkflowConfig,
};
use babyreel_content::Taxonomy;
use babyreel_engine::{
  EngineConfig, ExecutionEvent, ExecutionNotifier, Providers, WorkflowEngine, WorkflowReport,
};

const TEMPLATES_FILE: &str = "content-pillar-templates.json";

/// Babyreel - content pipeline for a baby-focused short video channel
#[derive(Parser)]
#[command(name = "babyreel")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Pillar template JSON (default: ~/.babyreel/content-pillar-templates.json, else built in)
  #[arg(long, global = true)]
  templates: Option<PathBuf>,

  /// Log level: debug, info, warning or error. RUST_LOG takes precedence.
  #[arg(long, global = true, default_value = "info")]
  log_level: LogLevel,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run workflow steps in order
  Run(RunArgs),

  /// Process a batch configuration file
  Batch(BatchArgs),

  /// Write a sample batch configuration
  InitBatch {
    /// Batch type (scripts or ideas)
    kind: BatchKind,

    /// Number of sample items
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// Where to write the configuration
    #[arg(long, default_value = "batch_config.json")]
    output: PathBuf,
  },
}

#[derive(Args)]
struct RunArgs {
  #[arg(long)]
  generate_ideas: bool,
  #[arg(long)]
  generate_scripts: bool,
  #[arg(long)]
  quality_check: bool,
  #[arg(long)]
  generate_metadata: bool,
  #[arg(long)]
  batch_process: bool,
  #[arg(long)]
  create_schedule: bool,

  /// Content pillar key, e.g. pillar_2_daily_adventures
  #[arg(long)]
  pillar: Option<String>,
  #[arg(long)]
  category: Option<String>,
  #[arg(long)]
  subcategory: Option<String>,
  #[arg(long)]
  baby_age: Option<String>,

  /// Generate ideas from the monthly theme
  #[arg(long)]
  theme_based: bool,

  /// Generate a seven-day plan instead of single ideas
  #[arg(long)]
  weekly_plan: bool,

  /// First day of the plan or schedule (YYYY-MM-DD, default today)
  #[arg(long)]
  start_date: Option<NaiveDate>,

  #[arg(long)]
  idea_count: Option<usize>,
  #[arg(long)]
  script_count: Option<usize>,

  /// Batch configuration for batch processing and script generation
  #[arg(long)]
  batch_file: Option<PathBuf>,

  /// Directory of scripts to check (default: <output-dir>/scripts)
  #[arg(long)]
  script_dir: Option<PathBuf>,

  #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
  output_dir: PathBuf,

  /// Keep going after a step fails
  #[arg(long)]
  continue_on_error: bool,

  /// Report what would run without calling providers or writing files
  #[arg(long)]
  dry_run: bool,

  /// Save a workflow report to the output directory
  #[arg(long)]
  report: bool,
}

impl RunArgs {
  fn into_config(self, log_level: LogLevel) -> WorkflowConfig {
    let steps = StepFlags {
      generate_ideas: self.generate_ideas,
      generate_scripts: self.generate_scripts,
      quality_check: self.quality_check,
      generate_metadata: self.generate_metadata,
      batch_process: self.batch_process,
      create_schedule: self.create_schedule,
    }
    .into_steps();

    let defaults = InputParams::default();
    let params = InputParams {
      pillar: self.pillar,
      category: self.category,
      subcategory: self.subcategory,
      baby_age: self.baby_age.unwrap_or(defaults.baby_age),
      theme_based: self.theme_based,
      weekly_plan: self.weekly_plan,
      start_date: self.start_date,
      idea_count: self.idea_count.unwrap_or(defaults.idea_count),
      script_count: self.script_count.unwrap_or(defaults.script_count),
      batch_file: self.batch_file,
      script_dir: self.script_dir,
      custom: defaults.custom,
    };

    WorkflowConfig {
      steps,
      params,
      output_dir: self.output_dir,
      continue_on_error: self.continue_on_error,
      dry_run: self.dry_run,
      log_level,
    }
  }
}

#[derive(Args)]
struct BatchArgs {
  /// Batch configuration file
  #[arg(long)]
  config: PathBuf,

  /// Output directory (overrides the configuration)
  #[arg(long)]
  output: Option<PathBuf>,

  /// Batch type (overrides the configuration)
  #[arg(long = "type")]
  kind: Option<BatchKind>,

  /// Worker count (overrides the configuration)
  #[arg(long)]
  workers: Option<usize>,

  #[arg(long)]
  continue_on_error: bool,

  /// Save a batch report to the output directory
  #[arg(long)]
  report: bool,
}

/// Prints execution events to stderr.
struct StderrNotifier;

impl ExecutionNotifier for StderrNotifier {
  fn notify(&self, event: ExecutionEvent) {
    match event {
      ExecutionEvent::WorkflowStarted {
        execution_id,
        steps,
        dry_run,
      } => {
        let names: Vec<&str> = steps.iter().map(|s| s.as_str()).collect();
        let mode = if dry_run { " (dry run)" } else { "" };
        eprintln!("Workflow {execution_id}{mode}: {}", names.join(", "));
      }
      ExecutionEvent::StepStarted { step, .. } => eprintln!("-> {step}"),
      ExecutionEvent::StepCompleted { step, .. } => eprintln!("   {step} completed"),
      ExecutionEvent::StepFailed { step, error, .. } => eprintln!("   {step} failed: {error}"),
      ExecutionEvent::Progress { message, .. } => eprintln!("   {message}"),
      ExecutionEvent::WorkflowCompleted {
        completed, failed, ..
      } => eprintln!("Workflow finished: {completed} completed, {failed} failed"),
      ExecutionEvent::WorkflowFailed { error, .. } => eprintln!("Workflow stopped: {error}"),
    }
  }
}

fn main() -> Result<()> {
  let Cli {
    templates,
    log_level,
    command,
  } = Cli::parse();
  init_tracing(log_level);

  let Some(command) = command else {
    println!("babyreel - use --help to see available commands");
    return Ok(());
  };

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async move {
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    match command {
      Commands::Run(args) => {
        let taxonomy = load_taxonomy(templates).await?;
        run_workflow(args, log_level, taxonomy, cancel).await
      }
      Commands::Batch(args) => {
        let taxonomy = load_taxonomy(templates).await?;
        run_batch(args, taxonomy, cancel).await
      }
      Commands::InitBatch {
        kind,
        count,
        output,
      } => init_batch(kind, count, output).await,
    }
  })
}

fn init_tracing(level: LogLevel) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

/// Ctrl-C stops new work from being submitted.
fn spawn_interrupt_handler(cancel: CancellationToken) {
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      warn!("interrupt received, stopping after in-flight work");
      cancel.cancel();
    }
  });
}

async fn load_taxonomy(templates: Option<PathBuf>) -> Result<Arc<Taxonomy>> {
  let path = match templates {
    Some(path) => Some(path),
    None => dirs::home_dir()
      .map(|home| home.join(".babyreel").join(TEMPLATES_FILE))
      .filter(|path| path.is_file()),
  };

  let Some(path) = path else {
    return Ok(Arc::new(Taxonomy::builtin()));
  };

  let taxonomy = Taxonomy::load(&path)
    .await
    .with_context(|| format!("failed to load templates file: {}", path.display()))?;

  info!(path = %path.display(), "loaded pillar templates");
  Ok(Arc::new(taxonomy))
}

async fn run_workflow(
  args: RunArgs,
  log_level: LogLevel,
  taxonomy: Arc<Taxonomy>,
  cancel: CancellationToken,
) -> Result<()> {
  let save_report = args.report;
  let config = args.into_config(log_level);

  let providers = Providers::builtin(taxonomy).context("failed to create providers")?;
  let engine = WorkflowEngine::with_notifier(providers, EngineConfig::default(), StderrNotifier);

  let (state, failure) = match engine.execute(&config, cancel).await {
    Ok(state) => (state, None),
    Err(e) => {
      let message = e.to_string();
      (e.into_state(), Some(message))
    }
  };

  let report = WorkflowReport::from_state(&state);
  if save_report && !config.dry_run {
    let path = report
      .save(&config.output_dir)
      .await
      .context("failed to save workflow report")?;
    eprintln!("Report saved to {}", path.display());
  }

  println!("{}", serde_json::to_string_pretty(&report)?);

  if let Some(message) = failure {
    bail!(message);
  }
  Ok(())
}

async fn run_batch(args: BatchArgs, taxonomy: Arc<Taxonomy>, cancel: CancellationToken) -> Result<()> {
  let mut batch = load_batch_config(&args.config)
    .await
    .with_context(|| format!("failed to load batch file: {}", args.config.display()))?;

  if let Some(kind) = args.kind {
    batch.kind = kind;
  }
  if let Some(workers) = args.workers {
    batch.max_workers = workers;
  }
  if args.continue_on_error {
    batch.continue_on_error = true;
  }
  batch.validate()?;

  let output_dir = args
    .output
    .or_else(|| batch.output_dir.clone())
    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR).join(batch.kind.as_str()));

  eprintln!(
    "Processing {} {} items with {} workers into {}",
    batch.items.len(),
    batch.kind,
    batch.max_workers,
    output_dir.display()
  );

  let providers = Providers::builtin(taxonomy).context("failed to create providers")?;
  let ts = timestamp(Local::now());
  let store = FsStore::new(&output_dir);
  let handler = GenerationItemHandler::new(
    batch.kind,
    providers.ideas,
    providers.scripts,
    Arc::new(store.clone()),
    ts.clone(),
  );

  let runner = BatchRunner::from_config(&batch);
  let report = runner.run(batch.items, Arc::new(handler), &cancel).await;

  let summary = &report.batch_summary;
  eprintln!(
    "Batch finished: {}/{} succeeded ({:.1}%) in {:.2}s",
    summary.successful_items,
    summary.total_items,
    report.success_rate(),
    summary.processing_time
  );
  for message in &report.error_summary.error_messages {
    eprintln!("   error: {message}");
  }

  if args.report {
    let path = store
      .put_json(&report_key("batch", &ts), &report)
      .await
      .context("failed to save batch report")?;
    eprintln!("Report saved to {}", path.display());
  }

  println!("{}", serde_json::to_string_pretty(summary)?);
  Ok(())
}

async fn init_batch(kind: BatchKind, count: usize, output: PathBuf) -> Result<()> {
  let config = BatchConfig::default_for(kind, count);
  let content = serde_json::to_string_pretty(&config)?;

  if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create directory: {}", parent.display()))?;
  }
  tokio::fs::write(&output, content)
    .await
    .with_context(|| format!("failed to write batch file: {}", output.display()))?;

  eprintln!("Wrote {count} sample {kind} items to {}", output.display());
  Ok(())
}
