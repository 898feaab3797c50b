//! babyreel Config
//!
//! This crate contains the serializable configuration types for babyreel.
//! These types describe a pipeline run before the engine executes it.
//!
//! Configuration can be built from:
//! - CLI flags (the `babyreel run` command converts its flags into a [`WorkflowConfig`])
//! - JSON files (batch configurations, via [`BatchConfig::from_json`])
//!
//! Every caller constructs one explicit [`WorkflowConfig`]; there is no
//! intermediate argument object.

mod batch;
mod error;
mod params;
mod step;
mod workflow;

pub use batch::{BatchConfig, BatchKind, DEFAULT_MAX_WORKERS, WorkItem};
pub use error::ConfigError;
pub use params::{CustomParams, DEFAULT_BABY_AGE, InputParams};
pub use step::{StepFlags, WorkflowStep};
pub use workflow::{DEFAULT_OUTPUT_DIR, LogLevel, WorkflowConfig};
