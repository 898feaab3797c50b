//! Babyreel content providers
//!
//! Everything the workflow treats as a generation black box lives here:
//!
//! - [`IdeaProvider`] produces single ideas and seven-day plans
//! - [`ScriptProvider`] renders a pillar prompt and returns a five-section script
//! - [`MetadataProvider`] derives titles, descriptions and tags
//! - [`QualityEvaluator`] scores scripts with heuristic checks
//!
//! The `Template*` implementations are backed by the pillar [`Taxonomy`],
//! which is either built in or loaded from a JSON template file.

mod calendar;
mod error;
mod idea;
mod metadata;
mod pillar;
mod quality;
mod script;
mod taxonomy;

pub use calendar::{DaySlot, MonthlyTheme, day_slot, monthly_theme, weekday_name, weekly_distribution};
pub use error::ProviderError;
pub use idea::{DayPlan, Idea, IdeaProvider, IdeaRequest, TemplateIdeaGenerator, WeeklyPlan};
pub use metadata::{MetadataProvider, TemplateMetadataGenerator, VideoMetadata, next_publish_time};
pub use pillar::{BABY_NAME, PillarKind};
pub use quality::{
  BatchEvaluation, BatchSummary, ChecksByCategory, EvaluationEntry, Grade, KeywordRule,
  QualityCheck, QualityEvaluator, QualityReport, QualityStandards, json_files, read_script,
};
pub use script::{
  DEFAULT_SCRIPT_CATEGORY, DEFAULT_SCRIPT_PILLAR, DEFAULT_SCRIPT_SUBCATEGORY, SCRIPT_SECTIONS,
  Script, ScriptBody, ScriptMetadata, ScriptProvider, ScriptRequest, ScriptSection,
  TemplateScriptGenerator,
};
pub use taxonomy::{Category, Pillar, Taxonomy};
