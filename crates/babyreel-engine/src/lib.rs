//! Babyreel Workflow Engine
//!
//! Runs a configured list of pipeline steps against the content providers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      WorkflowEngine                         │
//! │  - execute(config, cancel) → WorkflowState                  │
//! │  - steps run sequentially, in configuration order           │
//! │  - continue_on_error: record and go on, or stop             │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!               ┌───────────────┴───────────────┐
//!               ▼                               ▼
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │        Providers          │   │        BatchRunner        │
//! │  ideas, scripts,          │   │  bounded worker pool for  │
//! │  metadata, quality        │   │  batch files              │
//! └───────────────────────────┘   └───────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use babyreel_engine::{EngineConfig, Providers, WorkflowEngine, WorkflowReport};
//! use tokio_util::sync::CancellationToken;
//!
//! let providers = Providers::builtin(Arc::new(Taxonomy::builtin()))?;
//! let engine = WorkflowEngine::new(providers, EngineConfig::default());
//!
//! let state = engine.execute(&WorkflowConfig::default(), CancellationToken::new()).await?;
//! WorkflowReport::from_state(&state).save(&config.output_dir).await?;
//! ```

mod engine;
mod error;
mod events;
mod providers;
mod report;
mod state;
mod steps;

pub use engine::{EngineConfig, WorkflowEngine};
pub use error::{StepError, WorkflowError};
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use providers::Providers;
pub use report::{MetadataSummary, WorkflowReport, WorkflowSummary};
pub use state::{StepFailure, WorkflowState};
pub use steps::StepOutput;
