use std::sync::Arc;

use babyreel_config::InputParams;
use babyreel_content::{
  Grade, MetadataProvider, ProviderError, QualityEvaluator, ScriptProvider, ScriptRequest,
  Taxonomy, TemplateMetadataGenerator, TemplateScriptGenerator, json_files,
};

async fn write_script(dir: &std::path::Path, name: &str) {
  let generator = TemplateScriptGenerator::new(Arc::new(Taxonomy::builtin()));
  let script = generator
    .generate_script(&ScriptRequest::from(&InputParams::default()))
    .await
    .unwrap();
  let path = dir.join(name);
  tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
  tokio::fs::write(&path, serde_json::to_vec_pretty(&script).unwrap())
    .await
    .unwrap();
}

#[tokio::test]
async fn evaluates_nested_scripts_and_records_broken_files() {
  let dir = tempfile::tempdir().unwrap();
  write_script(dir.path(), "script_1.json").await;
  write_script(dir.path(), "nested/script_2.json").await;
  tokio::fs::write(dir.path().join("broken.json"), "{ not json")
    .await
    .unwrap();
  tokio::fs::write(dir.path().join("notes.txt"), "ignored")
    .await
    .unwrap();

  let evaluation = QualityEvaluator::default()
    .evaluate_dir(dir.path())
    .await
    .unwrap();

  let summary = &evaluation.batch_summary;
  assert_eq!(summary.total_scripts, 3);
  assert_eq!(summary.evaluated_scripts, 2);
  assert!(summary.average_score > 0.0);
  assert_eq!(summary.grade_distribution.values().sum::<usize>(), 2);

  let broken = evaluation
    .individual_results
    .iter()
    .find(|entry| entry.filename == "broken.json")
    .unwrap();
  assert!(broken.evaluation.is_none());
  assert!(broken.error.is_some());

  let nested = evaluation
    .individual_results
    .iter()
    .find(|entry| entry.filename == "script_2.json")
    .unwrap();
  let report = nested.evaluation.as_ref().unwrap();
  assert!(report.checks_by_category.technical.iter().any(|c| c.check_name == "file_format" && c.passed));
  assert_eq!(report.grade, Grade::from_score(report.overall_score));
}

#[tokio::test]
async fn json_files_walks_nested_directories_in_order() {
  let dir = tempfile::tempdir().unwrap();
  write_script(dir.path(), "week2/script_1.json").await;
  write_script(dir.path(), "week1/script_1.json").await;
  tokio::fs::write(dir.path().join("week1/notes.txt"), "ignored")
    .await
    .unwrap();

  let files = json_files(dir.path()).await.unwrap();
  assert_eq!(
    files,
    vec![
      dir.path().join("week1/script_1.json"),
      dir.path().join("week2/script_1.json"),
    ]
  );
}

#[tokio::test]
async fn missing_directory_is_an_error() {
  let dir = tempfile::tempdir().unwrap();
  let err = QualityEvaluator::default()
    .evaluate_dir(&dir.path().join("missing"))
    .await
    .unwrap_err();
  assert!(matches!(err, ProviderError::DirectoryNotFound(_)));
}

#[tokio::test]
async fn metadata_for_generated_script() {
  let generator = TemplateScriptGenerator::new(Arc::new(Taxonomy::builtin()));
  let script = generator
    .generate_script(&ScriptRequest::from(&InputParams::default()))
    .await
    .unwrap();

  let metadata = TemplateMetadataGenerator::with_seed(1)
    .unwrap()
    .generate_metadata(&script)
    .await
    .unwrap();

  assert!(metadata.title.chars().count() <= 60);
  assert_eq!(metadata.category, "Entertainment");
  assert_eq!(metadata.language, "en");
  assert!(metadata.tags.iter().map(|t| t.chars().count() + 2).sum::<usize>() <= 500);
}
