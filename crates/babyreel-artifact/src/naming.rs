//! Artifact key conventions.
//!
//! Keys embed a second-resolution local timestamp; items additionally embed
//! their index so concurrent writers never collide.

use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `20240610_093000`
pub fn timestamp(at: DateTime<Local>) -> String {
  at.format(TIMESTAMP_FORMAT).to_string()
}

/// `batch_report_20240610_093000.json`
pub fn report_key(kind: &str, ts: &str) -> String {
  format!("{kind}_report_{ts}.json")
}

/// `script_3_20240610_093000.json`
pub fn item_key(prefix: &str, index: usize, ts: &str) -> String {
  format!("{prefix}_{index}_{ts}.json")
}

/// `episode` becomes `episode.json`; names already ending in `.json` are kept.
pub fn ensure_json_extension(name: &str) -> String {
  if name.ends_with(".json") {
    name.to_string()
  } else {
    format!("{name}.json")
  }
}

/// The `attempt`-th candidate for `key`: `script_1.json`, then
/// `script_1_2.json`, `script_1_3.json` and so on.
pub fn numbered(key: &str, attempt: usize) -> String {
  if attempt <= 1 {
    return key.to_string();
  }
  match key.strip_suffix(".json") {
    Some(stem) => format!("{stem}_{attempt}.json"),
    None => format!("{key}_{attempt}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_keys() {
    let at = Local.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap();
    let ts = timestamp(at);
    assert_eq!(ts, "20240610_093000");
    assert_eq!(report_key("quality", &ts), "quality_report_20240610_093000.json");
    assert_eq!(item_key("idea", 2, &ts), "idea_2_20240610_093000.json");
  }

  #[test]
  fn test_numbered() {
    assert_eq!(numbered("metadata/a.json", 1), "metadata/a.json");
    assert_eq!(numbered("metadata/a.json", 2), "metadata/a_2.json");
    assert_eq!(numbered("notes", 3), "notes_3");
  }

  #[test]
  fn test_ensure_json_extension() {
    assert_eq!(ensure_json_extension("episode"), "episode.json");
    assert_eq!(ensure_json_extension("episode.json"), "episode.json");
  }
}
