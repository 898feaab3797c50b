//! Heuristic script quality evaluation.
//!
//! Every check scores 0-10. The overall score is the percentage of the
//! maximum possible score, graded A (>= 90) through F (< 60).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::ProviderError;
use crate::script::{SCRIPT_SECTIONS, Script};

/// Result of one named check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityCheck {
  pub check_name: String,
  pub passed: bool,
  pub score: f64,
  pub message: String,
}

impl QualityCheck {
  fn new(check_name: impl Into<String>, passed: bool, score: f64, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      passed,
      score,
      message: message.into(),
    }
  }
}

/// Letter grade for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
  A,
  B,
  C,
  D,
  F,
}

impl Grade {
  pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

  pub fn from_score(score: f64) -> Self {
    if score >= 90.0 {
      Grade::A
    } else if score >= 80.0 {
      Grade::B
    } else if score >= 70.0 {
      Grade::C
    } else if score >= 60.0 {
      Grade::D
    } else {
      Grade::F
    }
  }
}

/// Checks grouped by what they look at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecksByCategory {
  pub structure: Vec<QualityCheck>,
  pub content: Vec<QualityCheck>,
  pub engagement: Vec<QualityCheck>,
  pub technical: Vec<QualityCheck>,
}

impl ChecksByCategory {
  fn all(&self) -> impl Iterator<Item = &QualityCheck> {
    self
      .structure
      .iter()
      .chain(&self.content)
      .chain(&self.engagement)
      .chain(&self.technical)
  }
}

/// Evaluation of a single script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
  pub overall_score: f64,
  pub grade: Grade,
  pub total_checks: usize,
  pub passed_checks: usize,
  pub failed_checks: usize,
  pub checks_by_category: ChecksByCategory,
  pub evaluation_timestamp: DateTime<Local>,
  pub recommendations: Vec<String>,
}

impl QualityReport {
  pub fn detailed_checks(&self) -> impl Iterator<Item = &QualityCheck> {
    self.checks_by_category.all()
  }
}

/// Outcome for one file of a directory evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEntry {
  pub filepath: PathBuf,
  pub filename: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub evaluation: Option<QualityReport>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
  pub total_scripts: usize,
  pub evaluated_scripts: usize,
  /// Mean overall score of evaluated scripts, 0 when none were evaluated.
  pub average_score: f64,
  pub grade_distribution: BTreeMap<Grade, usize>,
  pub evaluation_timestamp: DateTime<Local>,
}

/// Evaluation of every script under a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEvaluation {
  pub batch_summary: BatchSummary,
  pub individual_results: Vec<EvaluationEntry>,
}

impl BatchEvaluation {
  pub fn from_entries(individual_results: Vec<EvaluationEntry>) -> Self {
    let mut grade_distribution: BTreeMap<Grade, usize> =
      Grade::ALL.iter().map(|grade| (*grade, 0)).collect();

    let scores: Vec<f64> = individual_results
      .iter()
      .filter_map(|entry| entry.evaluation.as_ref())
      .map(|report| {
        *grade_distribution.entry(report.grade).or_insert(0) += 1;
        report.overall_score
      })
      .collect();

    let average_score = if scores.is_empty() {
      0.0
    } else {
      scores.iter().sum::<f64>() / scores.len() as f64
    };

    Self {
      batch_summary: BatchSummary {
        total_scripts: individual_results.len(),
        evaluated_scripts: scores.len(),
        average_score,
        grade_distribution,
        evaluation_timestamp: Local::now(),
      },
      individual_results,
    }
  }
}

/// A named group of keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
  pub name: String,
  pub keywords: Vec<String>,
}

impl KeywordRule {
  fn new(name: &str, keywords: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
  }
}

/// Thresholds and keyword lists the evaluator scores against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityStandards {
  pub required_sections: Vec<String>,
  /// Expected section length in seconds.
  pub section_durations: BTreeMap<String, u32>,
  pub min_word_count: usize,
  pub max_word_count: usize,
  /// Matched as word prefixes ("learn" matches "learning").
  pub required_elements: Vec<KeywordRule>,
  /// Matched as whole words.
  pub prohibited_content: Vec<KeywordRule>,
  pub min_hashtags: usize,
  pub max_hashtags: usize,
  pub cta_types: Vec<String>,
  pub min_cta_types: usize,
  pub emotional_keywords: Vec<String>,
  pub min_title_length: usize,
  pub max_title_length: usize,
  pub file_size_limit_mb: u64,
}

impl Default for QualityStandards {
  fn default() -> Self {
    Self {
      required_sections: SCRIPT_SECTIONS.iter().map(|s| s.to_string()).collect(),
      section_durations: [
        ("hook", 15),
        ("setup", 15),
        ("main_content", 180),
        ("educational_element", 30),
        ("conclusion", 30),
      ]
      .into_iter()
      .map(|(name, secs)| (name.to_string(), secs))
      .collect(),
      min_word_count: 300,
      max_word_count: 800,
      required_elements: vec![
        KeywordRule::new("baby_age_reference", &["months", "years", "old", "age", "month", "year"]),
        KeywordRule::new("developmental_focus", &["development", "learn", "skill", "milestone", "growth"]),
        KeywordRule::new("engaging_language", &["amazing", "adorable", "exciting", "wonderful", "beautiful"]),
        KeywordRule::new("clear_structure", &["first", "next", "then", "finally", "step"]),
        KeywordRule::new("call_to_action", &["subscribe", "like", "comment", "share", "watch"]),
      ],
      prohibited_content: vec![
        KeywordRule::new("inappropriate_language", &["stupid", "hate", "idiot", "dumb"]),
        KeywordRule::new("unsafe_practices", &["dangerous", "unsafe", "harm", "hurt"]),
        KeywordRule::new("medical_advice", &["diagnosis", "medication", "treatment", "prescription"]),
      ],
      min_hashtags: 5,
      max_hashtags: 15,
      cta_types: vec!["subscribe".into(), "comment".into(), "share".into()],
      min_cta_types: 2,
      emotional_keywords: ["amazing", "adorable", "heartwarming", "exciting", "magical"]
        .iter()
        .map(|k| k.to_string())
        .collect(),
      min_title_length: 10,
      max_title_length: 80,
      file_size_limit_mb: 10,
    }
  }
}

/// Lowercase alphanumeric words of `text`.
fn words(text: &str) -> Vec<String> {
  text
    .split(|c: char| !c.is_alphanumeric() && c != '\'')
    .filter(|w| !w.is_empty())
    .map(|w| w.to_lowercase())
    .collect()
}

fn has_prefix(words: &[String], keyword: &str) -> bool {
  let keyword = keyword.to_lowercase();
  words.iter().any(|w| w.starts_with(&keyword))
}

fn has_word(words: &[String], keyword: &str) -> bool {
  let keyword = keyword.to_lowercase();
  words.iter().any(|w| *w == keyword)
}

/// Scores scripts against [`QualityStandards`].
#[derive(Debug, Clone, Default)]
pub struct QualityEvaluator {
  standards: QualityStandards,
}

impl QualityEvaluator {
  pub fn new(standards: QualityStandards) -> Self {
    Self { standards }
  }

  pub fn standards(&self) -> &QualityStandards {
    &self.standards
  }

  fn structure_checks(&self, script: &Script) -> Vec<QualityCheck> {
    let mut checks = Vec::new();

    for name in &self.standards.required_sections {
      let present = script.script.section(name).is_some();
      checks.push(if present {
        QualityCheck::new(
          format!("required_section_{name}"),
          true,
          10.0,
          format!("Required section {name} present"),
        )
      } else {
        QualityCheck::new(
          format!("required_section_{name}"),
          false,
          0.0,
          format!("Missing required section: {name}"),
        )
      });
    }

    for (name, seconds) in &self.standards.section_durations {
      if script.script.section(name).is_some() {
        checks.push(QualityCheck::new(
          format!("section_duration_{name}"),
          true,
          10.0,
          format!("Section {name} duration should be {seconds} seconds"),
        ));
      }
    }

    checks
  }

  fn content_checks(&self, text: &str, words: &[String]) -> Vec<QualityCheck> {
    let standards = &self.standards;
    let mut checks = Vec::new();

    let word_count = text.split_whitespace().count();
    let (min, max) = (standards.min_word_count, standards.max_word_count);
    checks.push(if (min..=max).contains(&word_count) {
      QualityCheck::new(
        "word_count",
        true,
        10.0,
        format!("Word count {word_count} is within acceptable range ({min}-{max})"),
      )
    } else {
      QualityCheck::new(
        "word_count",
        false,
        5.0,
        format!("Word count {word_count} is outside acceptable range ({min}-{max})"),
      )
    });

    for rule in &standards.required_elements {
      let found = rule.keywords.iter().any(|k| has_prefix(words, k));
      let name = &rule.name;
      checks.push(if found {
        QualityCheck::new(
          format!("required_element_{name}"),
          true,
          8.0,
          format!("Required element '{name}' found"),
        )
      } else {
        QualityCheck::new(
          format!("required_element_{name}"),
          false,
          0.0,
          format!("Required element '{name}' not found"),
        )
      });
    }

    for rule in &standards.prohibited_content {
      let found = rule.keywords.iter().any(|k| has_word(words, k));
      let name = &rule.name;
      checks.push(if found {
        QualityCheck::new(
          format!("prohibited_content_{name}"),
          false,
          0.0,
          format!("Prohibited content '{name}' found"),
        )
      } else {
        QualityCheck::new(
          format!("prohibited_content_{name}"),
          true,
          10.0,
          format!("No prohibited content '{name}' found"),
        )
      });
    }

    checks
  }

  fn engagement_checks(&self, script: &Script, words: &[String]) -> Vec<QualityCheck> {
    let standards = &self.standards;
    let mut checks = Vec::new();

    if let Some(hashtags) = &script.metadata.hashtags {
      let count = hashtags.len();
      checks.push(
        if (standards.min_hashtags..=standards.max_hashtags).contains(&count) {
          QualityCheck::new(
            "hashtag_count",
            true,
            10.0,
            format!("Hashtag count {count} is within acceptable range"),
          )
        } else {
          QualityCheck::new(
            "hashtag_count",
            false,
            5.0,
            format!("Hashtag count {count} is outside acceptable range"),
          )
        },
      );
    }

    let found_ctas = standards
      .cta_types
      .iter()
      .filter(|cta| has_prefix(words, cta))
      .count();
    checks.push(if found_ctas >= standards.min_cta_types {
      QualityCheck::new(
        "call_to_action_variety",
        true,
        10.0,
        format!("Found {found_ctas} different call-to-action types"),
      )
    } else {
      QualityCheck::new(
        "call_to_action_variety",
        false,
        5.0,
        format!(
          "Only found {found_ctas} call-to-action types, need at least {}",
          standards.min_cta_types
        ),
      )
    });

    let found: Vec<&str> = standards
      .emotional_keywords
      .iter()
      .filter(|k| has_prefix(words, k))
      .map(String::as_str)
      .collect();
    let total = standards.emotional_keywords.len().max(1) as f64;
    let score = (found.len() as f64 / total * 10.0).min(10.0);
    checks.push(QualityCheck::new(
      "emotional_keywords",
      score >= 5.0,
      score,
      format!("Found {} emotional keywords: {}", found.len(), found.join(", ")),
    ));

    checks
  }

  async fn technical_checks(&self, script: &Script, path: Option<&Path>) -> Vec<QualityCheck> {
    let standards = &self.standards;
    let mut checks = Vec::new();

    if let Some(path) = path {
      let is_json = path.extension().is_some_and(|ext| ext == "json");
      checks.push(if is_json {
        QualityCheck::new("file_format", true, 10.0, "File format is JSON (required)")
      } else {
        QualityCheck::new("file_format", false, 0.0, "File format is not JSON")
      });

      let limit = standards.file_size_limit_mb * 1024 * 1024;
      checks.push(match tokio::fs::metadata(path).await {
        Ok(meta) => {
          let size_mb = meta.len() as f64 / 1024.0 / 1024.0;
          if meta.len() <= limit {
            QualityCheck::new(
              "file_size",
              true,
              10.0,
              format!("File size {size_mb:.2}MB is within limit"),
            )
          } else {
            QualityCheck::new(
              "file_size",
              false,
              0.0,
              format!(
                "File size {size_mb:.2}MB exceeds limit of {}MB",
                standards.file_size_limit_mb
              ),
            )
          }
        }
        Err(_) => QualityCheck::new("file_size", false, 0.0, "Could not check file size"),
      });
    }

    if let Some(title) = &script.metadata.title {
      let length = title.chars().count();
      checks.push(
        if (standards.min_title_length..=standards.max_title_length).contains(&length) {
          QualityCheck::new(
            "title_length",
            true,
            10.0,
            format!("Title length {length} is within acceptable range"),
          )
        } else {
          QualityCheck::new(
            "title_length",
            false,
            5.0,
            format!("Title length {length} is outside acceptable range"),
          )
        },
      );
    }

    checks
  }

  /// Evaluate one script. File checks run only when `path` is given.
  pub async fn evaluate(&self, script: &Script, path: Option<&Path>) -> QualityReport {
    let text = script.script.full_text();
    let words = words(&text);

    let checks_by_category = ChecksByCategory {
      structure: self.structure_checks(script),
      content: self.content_checks(&text, &words),
      engagement: self.engagement_checks(script, &words),
      technical: self.technical_checks(script, path).await,
    };

    let (total_checks, passed_checks, total_score) = checks_by_category
      .all()
      .fold((0, 0, 0.0), |(n, passed, sum), check| {
        (n + 1, passed + usize::from(check.passed), sum + check.score)
      });

    let max_score = total_checks as f64 * 10.0;
    let overall_score = if max_score > 0.0 {
      total_score / max_score * 100.0
    } else {
      0.0
    };

    let recommendations = recommendations(checks_by_category.all());

    QualityReport {
      overall_score,
      grade: Grade::from_score(overall_score),
      total_checks,
      passed_checks,
      failed_checks: total_checks - passed_checks,
      checks_by_category,
      evaluation_timestamp: Local::now(),
      recommendations,
    }
  }

  /// Evaluate every `.json` file under `dir`, recursively.
  ///
  /// Files that cannot be read or parsed are recorded with an error and do not
  /// count toward the average.
  pub async fn evaluate_dir(&self, dir: &Path) -> Result<BatchEvaluation, ProviderError> {
    if !tokio::fs::metadata(dir).await.is_ok_and(|m| m.is_dir()) {
      return Err(ProviderError::DirectoryNotFound(dir.to_path_buf()));
    }

    let files = json_files(dir).await?;
    debug!(dir = %dir.display(), files = files.len(), "evaluating scripts");

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
      let filename = file_name(&path);
      match read_script(&path).await {
        Ok(script) => {
          let evaluation = self.evaluate(&script, Some(&path)).await;
          entries.push(EvaluationEntry {
            filepath: path,
            filename,
            evaluation: Some(evaluation),
            error: None,
          });
        }
        Err(e) => {
          warn!(path = %path.display(), error = %e, "script_evaluation_failed");
          entries.push(EvaluationEntry {
            filepath: path,
            filename,
            evaluation: None,
            error: Some(e.to_string()),
          });
        }
      }
    }

    Ok(BatchEvaluation::from_entries(entries))
  }
}

fn recommendations<'a>(checks: impl Iterator<Item = &'a QualityCheck>) -> Vec<String> {
  let mut recommendations: Vec<String> = Vec::new();

  for check in checks.filter(|c| !c.passed) {
    let name = check.check_name.as_str();
    let advice = if name.contains("word_count") {
      "Consider adjusting the content length to meet optimal word count requirements"
    } else if name.contains("required_section") {
      "Add the missing script section to complete the video structure"
    } else if name.contains("required_element") {
      "Add the missing required element to improve content quality"
    } else if name.contains("prohibited_content") {
      "Remove or rephrase content that violates the channel guidelines"
    } else if name.contains("hashtag_count") {
      "Adjust the number of hashtags for better discoverability"
    } else if name.contains("call_to_action") {
      "Include more variety in call-to-action elements"
    } else if name.contains("emotional") {
      "Use more emotionally engaging language"
    } else if name.contains("file_size") {
      "Optimize file size by reducing unnecessary content"
    } else if name.contains("title_length") {
      "Adjust title length to meet optimal requirements"
    } else {
      continue;
    };

    if !recommendations.iter().any(|r| r == advice) {
      recommendations.push(advice.to_string());
    }
  }

  if recommendations.is_empty() {
    recommendations.push("Content meets all quality standards!".to_string());
  }

  recommendations
}

/// Every `.json` file under `dir`, sorted by path.
///
/// The walk runs on the blocking pool.
pub async fn json_files(dir: &Path) -> Result<Vec<PathBuf>, ProviderError> {
  let dir = dir.to_path_buf();
  let files = tokio::task::spawn_blocking(move || {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
      .into_iter()
      .filter_map(|entry| entry.ok())
      .filter(|entry| entry.file_type().is_file())
      .map(|entry| entry.into_path())
      .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
      .collect();
    files.sort();
    files
  })
  .await?;
  Ok(files)
}

/// Read and parse a script file.
pub async fn read_script(path: &Path) -> Result<Script, ProviderError> {
  let content = tokio::fs::read_to_string(path)
    .await
    .map_err(|source| ProviderError::Read {
      path: path.to_path_buf(),
      source,
    })?;
  Ok(serde_json::from_str(&content)?)
}

fn file_name(path: &Path) -> String {
  path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::script::{ScriptBody, ScriptSection};

  fn section(content: &str) -> Option<ScriptSection> {
    Some(ScriptSection {
      content: content.to_string(),
      visual_description: String::new(),
      audio: String::new(),
      duration: String::new(),
    })
  }

  fn script() -> Script {
    Script {
      script: ScriptBody {
        title: "Morning adventure".to_string(),
        hook: section("An amazing and adorable morning for our 8 months old!"),
        setup: section("First we get ready, then we explore."),
        main_content: section("Watch her learn a new skill. It is exciting and magical."),
        educational_element: section("A heartwarming milestone for development."),
        conclusion: section("Please subscribe, comment and share with friends."),
      },
      ..Default::default()
    }
  }

  #[test]
  fn test_grade_thresholds() {
    assert_eq!(Grade::from_score(95.0), Grade::A);
    assert_eq!(Grade::from_score(90.0), Grade::A);
    assert_eq!(Grade::from_score(89.9), Grade::B);
    assert_eq!(Grade::from_score(70.0), Grade::C);
    assert_eq!(Grade::from_score(60.0), Grade::D);
    assert_eq!(Grade::from_score(59.9), Grade::F);
  }

  #[tokio::test]
  async fn test_complete_script_passes_structure_and_engagement() {
    let report = QualityEvaluator::default().evaluate(&script(), None).await;

    let structure = &report.checks_by_category.structure;
    assert_eq!(structure.len(), 10);
    assert!(structure.iter().all(|c| c.passed));

    let engagement = &report.checks_by_category.engagement;
    let cta = engagement
      .iter()
      .find(|c| c.check_name == "call_to_action_variety")
      .unwrap();
    assert!(cta.passed);
    let emotional = engagement
      .iter()
      .find(|c| c.check_name == "emotional_keywords")
      .unwrap();
    assert_eq!(emotional.score, 10.0);

    // Short sample text fails the word count only.
    let word_count = &report.checks_by_category.content[0];
    assert_eq!(word_count.check_name, "word_count");
    assert!(!word_count.passed);
    assert!(report.checks_by_category.technical.is_empty());
    assert_eq!(report.total_checks, report.passed_checks + report.failed_checks);
  }

  #[tokio::test]
  async fn test_overall_score_is_percentage_of_maximum() {
    let report = QualityEvaluator::default().evaluate(&script(), None).await;
    let total: f64 = report.detailed_checks().map(|c| c.score).sum();
    let expected = total / (report.total_checks as f64 * 10.0) * 100.0;
    assert!((report.overall_score - expected).abs() < 1e-9);
    assert_eq!(report.grade, Grade::from_score(expected));
  }

  #[tokio::test]
  async fn test_missing_sections_are_scored_zero() {
    let script = Script::default();
    let report = QualityEvaluator::default().evaluate(&script, None).await;
    let missing = report
      .checks_by_category
      .structure
      .iter()
      .filter(|c| !c.passed && c.score == 0.0)
      .count();
    assert_eq!(missing, 5);
    assert!(report
      .recommendations
      .contains(&"Add the missing script section to complete the video structure".to_string()));
  }

  #[tokio::test]
  async fn test_prohibited_words_match_whole_words_only() {
    let mut script = script();
    script.script.setup = section("A small smile from our baby.");
    let report = QualityEvaluator::default().evaluate(&script, None).await;
    assert!(report
      .checks_by_category
      .content
      .iter()
      .filter(|c| c.check_name.starts_with("prohibited_content_"))
      .all(|c| c.passed));

    script.script.setup = section("That stupid toy.");
    let report = QualityEvaluator::default().evaluate(&script, None).await;
    let check = report
      .checks_by_category
      .content
      .iter()
      .find(|c| c.check_name == "prohibited_content_inappropriate_language")
      .unwrap();
    assert!(!check.passed);
  }

  #[tokio::test]
  async fn test_hashtag_and_title_checks_need_metadata() {
    let mut script = script();
    script.metadata.hashtags = Some(vec!["#a".into(), "#b".into()]);
    script.metadata.title = Some("A fine title for a video".to_string());
    let report = QualityEvaluator::default().evaluate(&script, None).await;

    let hashtags = report
      .checks_by_category
      .engagement
      .iter()
      .find(|c| c.check_name == "hashtag_count")
      .unwrap();
    assert!(!hashtags.passed);
    assert_eq!(hashtags.score, 5.0);

    let title = report
      .checks_by_category
      .technical
      .iter()
      .find(|c| c.check_name == "title_length")
      .unwrap();
    assert!(title.passed);
  }

  #[test]
  fn test_batch_summary_averages_evaluated_only() {
    let summary = BatchEvaluation::from_entries(vec![EvaluationEntry {
      filepath: PathBuf::from("broken.json"),
      filename: "broken.json".to_string(),
      evaluation: None,
      error: Some("invalid json".to_string()),
    }])
    .batch_summary;
    assert_eq!(summary.total_scripts, 1);
    assert_eq!(summary.evaluated_scripts, 0);
    assert_eq!(summary.average_score, 0.0);
    assert_eq!(summary.grade_distribution.len(), 5);
  }
}
