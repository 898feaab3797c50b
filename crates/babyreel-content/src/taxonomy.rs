//! Pillar / category / subcategory taxonomy.
//!
//! The taxonomy is a JSON document keyed by pillar:
//!
//! ```json
//! {
//!   "pillar_2_daily_adventures": {
//!     "name": "Daily Adventures & Exploration",
//!     "target_audience": "Parents looking for everyday inspiration",
//!     "content_mix_percentage": 25,
//!     "prompt_template": "Write a {{ tone }} script about {{ subcategory }}...",
//!     "categories": {
//!       "everyday_discoveries": {
//!         "subcategories": ["morning_routine_magic"],
//!         "key_elements": ["authentic reactions"]
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::pillar::PillarKind;

/// A category inside a pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub subcategories: Vec<String>,
  #[serde(default)]
  pub key_elements: Vec<String>,
}

/// A content pillar and its prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
  pub name: String,
  #[serde(default)]
  pub target_audience: String,
  #[serde(default)]
  pub content_mix_percentage: u32,
  /// minijinja template rendered into the script prompt.
  pub prompt_template: String,
  pub categories: BTreeMap<String, Category>,
}

impl Pillar {
  pub fn kind(&self) -> Option<PillarKind> {
    PillarKind::classify(&self.name)
  }
}

/// The full three-level taxonomy, keyed by pillar key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
  pillars: BTreeMap<String, Pillar>,
}

impl Taxonomy {
  pub fn new(pillars: BTreeMap<String, Pillar>) -> Self {
    Self { pillars }
  }

  pub fn from_json(content: &str) -> Result<Self, ProviderError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Read a pillar template file.
  pub async fn load(path: &Path) -> Result<Self, ProviderError> {
    let content = tokio::fs::read_to_string(path)
      .await
      .map_err(|source| ProviderError::Read {
        path: path.to_path_buf(),
        source,
      })?;
    Self::from_json(&content)
  }

  pub fn pillar(&self, key: &str) -> Result<&Pillar, ProviderError> {
    self
      .pillars
      .get(key)
      .ok_or_else(|| ProviderError::InvalidPillar(key.to_string()))
  }

  /// Pillar keys in sorted order.
  pub fn pillar_keys(&self) -> impl Iterator<Item = &str> {
    self.pillars.keys().map(String::as_str)
  }

  /// Look up a pillar key by display name.
  pub fn key_for_name(&self, name: &str) -> Option<&str> {
    self
      .pillars
      .iter()
      .find(|(_, pillar)| pillar.name == name)
      .map(|(key, _)| key.as_str())
  }

  pub fn category(&self, pillar: &str, category: &str) -> Result<&Category, ProviderError> {
    self
      .pillar(pillar)?
      .categories
      .get(category)
      .ok_or_else(|| ProviderError::UnknownCategory {
        pillar: pillar.to_string(),
        category: category.to_string(),
      })
  }

  /// Find the category that owns `subcategory` within `pillar`.
  pub fn category_of(
    &self,
    pillar: &str,
    subcategory: &str,
  ) -> Result<(&str, &Category), ProviderError> {
    self
      .pillar(pillar)?
      .categories
      .iter()
      .find(|(_, category)| category.subcategories.iter().any(|s| s == subcategory))
      .map(|(name, category)| (name.as_str(), category))
      .ok_or_else(|| ProviderError::UnknownSubcategory {
        pillar: pillar.to_string(),
        subcategory: subcategory.to_string(),
      })
  }

  /// The taxonomy shipped with the binary.
  pub fn builtin() -> Self {
    let mut pillars = BTreeMap::new();

    pillars.insert(
      PillarKind::DevelopmentalMilestones.key().to_string(),
      Pillar {
        name: PillarKind::DevelopmentalMilestones.name().to_string(),
        target_audience: "New parents tracking their baby's growth and learning".to_string(),
        content_mix_percentage: 25,
        prompt_template: "Create a {{ tone }} video script showing a {{ baby_age }} old baby \
          exploring {{ subcategory }}. Audience: {{ audience_focus }}. \
          Activity: {{ activity_description }}. Highlight these elements: {{ key_elements }}."
          .to_string(),
        categories: categories(&[
          (
            "learning_activities",
            &[
              "sensory_play_sessions",
              "tummy_time_adventures",
              "stacking_and_sorting",
            ][..],
            &["developmental benefit", "age-appropriate activity", "parent guidance"][..],
          ),
          (
            "milestone_celebrations",
            &["first_steps_series", "first_words_moments", "crawling_progress"][..],
            &["milestone context", "celebration moment", "progress comparison"][..],
          ),
        ]),
      },
    );

    pillars.insert(
      PillarKind::DailyAdventures.key().to_string(),
      Pillar {
        name: PillarKind::DailyAdventures.name().to_string(),
        target_audience: "Families looking for everyday inspiration".to_string(),
        content_mix_percentage: 25,
        prompt_template: "Create a {{ tone }} video script following a {{ baby_age }} old baby \
          through {{ subcategory }}. Audience: {{ audience_focus }}. \
          Activity: {{ activity_description }}. Capture these elements: {{ key_elements }}."
          .to_string(),
        categories: categories(&[
          (
            "everyday_discoveries",
            &["morning_routine_magic", "bath_time_fun", "kitchen_explorations"][..],
            &["authentic reactions", "sense of wonder", "everyday setting"][..],
          ),
          (
            "outdoor_exploration",
            &["park_adventures", "nature_walks", "beach_day_firsts"][..],
            &["new environment", "sensory details", "safety awareness"][..],
          ),
        ]),
      },
    );

    pillars.insert(
      PillarKind::ParentingHacks.key().to_string(),
      Pillar {
        name: PillarKind::ParentingHacks.name().to_string(),
        target_audience: "Busy parents searching for practical solutions".to_string(),
        content_mix_percentage: 20,
        prompt_template: "Create a {{ tone }} video script sharing a {{ subcategory }} tip for \
          parents of a {{ baby_age }} old baby. Challenge: {{ parenting_challenge }}. \
          Practical elements: {{ practical_elements }}. Audience need: {{ audience_need }}. \
          Key elements: {{ key_elements }}."
          .to_string(),
        categories: categories(&[
          (
            "sleep_solutions",
            &["bedtime_routine_tips", "nap_schedule_hacks"][..],
            &["problem statement", "step-by-step solution", "real results"][..],
          ),
          (
            "feeding_tips",
            &["first_foods_guide", "mealtime_mess_solutions"][..],
            &["practical demonstration", "time-saving tip", "baby reaction"][..],
          ),
          (
            "product_reviews",
            &["baby_gear_reviews", "toy_recommendations"][..],
            &["honest pros and cons", "real usage footage", "value for money"][..],
          ),
        ]),
      },
    );

    pillars.insert(
      PillarKind::FamilyBonding.key().to_string(),
      Pillar {
        name: PillarKind::FamilyBonding.name().to_string(),
        target_audience: "Families who value connection and traditions".to_string(),
        content_mix_percentage: 15,
        prompt_template: "Create a {{ tone }} video script about {{ subcategory }} with a \
          {{ baby_age }} old baby and her family. Emotional elements: {{ emotional_elements }}. \
          Audience: {{ audience_focus }}. Key elements: {{ key_elements }}."
          .to_string(),
        categories: categories(&[
          (
            "family_traditions",
            &["weekend_family_rituals", "holiday_celebrations"][..],
            &["family interaction", "tradition meaning", "emotional moment"][..],
          ),
          (
            "grandparent_moments",
            &["grandparent_visits", "family_storytime"][..],
            &["generational connection", "shared memories", "heartfelt reactions"][..],
          ),
        ]),
      },
    );

    pillars.insert(
      PillarKind::FunChallenges.key().to_string(),
      Pillar {
        name: PillarKind::FunChallenges.name().to_string(),
        target_audience: "Viewers who love playful, shareable baby moments".to_string(),
        content_mix_percentage: 15,
        prompt_template: "Create a {{ tone }} video script for a {{ subcategory }} featuring a \
          {{ baby_age }} old baby. Entertainment elements: {{ entertainment_elements }}. \
          Audience: {{ audience_focus }}. Key elements: {{ key_elements }}."
          .to_string(),
        categories: categories(&[
          (
            "reaction_challenges",
            &["first_taste_test", "funny_sounds_reactions"][..],
            &["genuine reactions", "playful setup", "replay-worthy moment"][..],
          ),
          (
            "playful_games",
            &["peekaboo_challenge", "music_and_dance_party"][..],
            &["high energy", "parent participation", "laughter"][..],
          ),
        ]),
      },
    );

    Self { pillars }
  }
}

impl Default for Taxonomy {
  fn default() -> Self {
    Self::builtin()
  }
}

type CategorySpec<'a> = (&'a str, &'a [&'a str], &'a [&'a str]);

fn categories(specs: &[CategorySpec<'_>]) -> BTreeMap<String, Category> {
  specs
    .iter()
    .map(|(name, subcategories, key_elements)| {
      (
        name.to_string(),
        Category {
          subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
          key_elements: key_elements.iter().map(|s| s.to_string()).collect(),
        },
      )
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtin_covers_every_pillar() {
    let taxonomy = Taxonomy::builtin();
    for kind in PillarKind::ALL {
      let pillar = taxonomy.pillar(kind.key()).unwrap();
      assert_eq!(pillar.kind(), Some(kind));
      assert!(!pillar.categories.is_empty());
    }
  }

  #[test]
  fn test_category_of_finds_owner() {
    let taxonomy = Taxonomy::builtin();
    let (name, category) = taxonomy
      .category_of("pillar_2_daily_adventures", "morning_routine_magic")
      .unwrap();
    assert_eq!(name, "everyday_discoveries");
    assert!(category.key_elements.contains(&"authentic reactions".to_string()));
  }

  #[test]
  fn test_unknown_lookups() {
    let taxonomy = Taxonomy::builtin();
    assert!(matches!(
      taxonomy.pillar("pillar_9"),
      Err(ProviderError::InvalidPillar(_))
    ));
    assert!(matches!(
      taxonomy.category_of("pillar_2_daily_adventures", "moon_landing"),
      Err(ProviderError::UnknownSubcategory { .. })
    ));
  }

  #[test]
  fn test_json_round_trip_is_keyed_by_pillar() {
    let taxonomy = Taxonomy::builtin();
    let json = serde_json::to_string(&taxonomy).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("pillar_1_developmental_milestones").is_some());
    assert_eq!(Taxonomy::from_json(&json).unwrap(), taxonomy);
  }

  #[test]
  fn test_key_for_name() {
    let taxonomy = Taxonomy::builtin();
    assert_eq!(
      taxonomy.key_for_name("Family Bonding & Traditions"),
      Some("pillar_4_family_bonding")
    );
    assert_eq!(taxonomy.key_for_name("Relaxation"), None);
  }
}
