use std::sync::Arc;

use babyreel_content::{
  IdeaProvider, MetadataProvider, ProviderError, QualityEvaluator, ScriptProvider, Taxonomy,
  TemplateIdeaGenerator, TemplateMetadataGenerator, TemplateScriptGenerator,
};

/// The generation backends a workflow calls into.
#[derive(Clone)]
pub struct Providers {
  pub ideas: Arc<dyn IdeaProvider>,
  pub scripts: Arc<dyn ScriptProvider>,
  pub metadata: Arc<dyn MetadataProvider>,
  pub quality: Arc<QualityEvaluator>,
}

impl Providers {
  /// Template-backed providers over `taxonomy`.
  pub fn builtin(taxonomy: Arc<Taxonomy>) -> Result<Self, ProviderError> {
    Ok(Self {
      ideas: Arc::new(TemplateIdeaGenerator::new(taxonomy.clone())),
      scripts: Arc::new(TemplateScriptGenerator::new(taxonomy)),
      metadata: Arc::new(TemplateMetadataGenerator::new()?),
      quality: Arc::new(QualityEvaluator::default()),
    })
  }
}
