//! Fixed weekly content distribution and monthly themes.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::pillar::PillarKind;

/// What the channel publishes on a given weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
  pub weekday: Weekday,
  /// Pillar the day is dedicated to, `None` for mixed-content days.
  pub pillar: Option<PillarKind>,
  pub content_type: &'static str,
  pub video_length: &'static str,
  pub secondary_focus: &'static str,
}

const WEEKLY_DISTRIBUTION: [DaySlot; 7] = [
  DaySlot {
    weekday: Weekday::Mon,
    pillar: Some(PillarKind::DevelopmentalMilestones),
    content_type: "Learning Activity",
    video_length: "5-7 min",
    secondary_focus: "Parenting Tip",
  },
  DaySlot {
    weekday: Weekday::Tue,
    pillar: Some(PillarKind::DailyAdventures),
    content_type: "First Experience",
    video_length: "4-6 min",
    secondary_focus: "Family Bonding",
  },
  DaySlot {
    weekday: Weekday::Wed,
    pillar: Some(PillarKind::ParentingHacks),
    content_type: "Product Review",
    video_length: "6-8 min",
    secondary_focus: "Practical Solution",
  },
  DaySlot {
    weekday: Weekday::Thu,
    pillar: Some(PillarKind::FamilyBonding),
    content_type: "Tradition/Activity",
    video_length: "5-7 min",
    secondary_focus: "Daily Adventure",
  },
  DaySlot {
    weekday: Weekday::Fri,
    pillar: Some(PillarKind::FunChallenges),
    content_type: "Challenge/Reaction",
    video_length: "4-6 min",
    secondary_focus: "Developmental",
  },
  DaySlot {
    weekday: Weekday::Sat,
    pillar: None,
    content_type: "Compilation/Update",
    video_length: "7-10 min",
    secondary_focus: "Multiple Pillars",
  },
  // Sunday wind-down videos come from the family pillar.
  DaySlot {
    weekday: Weekday::Sun,
    pillar: Some(PillarKind::FamilyBonding),
    content_type: "Wind-down Activity",
    video_length: "3-5 min",
    secondary_focus: "Family Bonding",
  },
];

/// The seven day slots, Monday first.
pub fn weekly_distribution() -> &'static [DaySlot; 7] {
  &WEEKLY_DISTRIBUTION
}

pub fn day_slot(weekday: Weekday) -> &'static DaySlot {
  &WEEKLY_DISTRIBUTION[weekday.num_days_from_monday() as usize]
}

/// Lowercase English weekday name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
  match weekday {
    Weekday::Mon => "monday",
    Weekday::Tue => "tuesday",
    Weekday::Wed => "wednesday",
    Weekday::Thu => "thursday",
    Weekday::Fri => "friday",
    Weekday::Sat => "saturday",
    Weekday::Sun => "sunday",
  }
}

/// The theme a month's content leans into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTheme {
  pub month: String,
  pub primary_theme: String,
  pub secondary_theme: String,
  pub special_focus: String,
}

const MONTHLY_THEMES: [(&str, &str, &str, &str, PillarKind); 12] = [
  ("january", "New Beginnings", "Developmental Goals", "Setting intentions", PillarKind::DevelopmentalMilestones),
  ("february", "Love & Connection", "Family Traditions", "Valentine's Day", PillarKind::FamilyBonding),
  ("march", "Exploration", "Outdoor Adventures", "Spring activities", PillarKind::DailyAdventures),
  ("april", "Growth & Learning", "Educational Content", "Earth Day awareness", PillarKind::DevelopmentalMilestones),
  ("may", "Family Fun", "Outdoor Activities", "Mother's Day", PillarKind::FamilyBonding),
  ("june", "Summer Adventures", "Water Play", "Father's Day", PillarKind::DailyAdventures),
  ("july", "Creativity", "Arts & Crafts", "Independence Day", PillarKind::FunChallenges),
  ("august", "Back to Basics", "Routines", "School preparation", PillarKind::ParentingHacks),
  ("september", "Learning Focus", "Educational Toys", "Fall activities", PillarKind::DevelopmentalMilestones),
  ("october", "Halloween Fun", "Costumes & Decorations", "Seasonal traditions", PillarKind::FunChallenges),
  ("november", "Gratitude", "Family Traditions", "Thanksgiving", PillarKind::FamilyBonding),
  ("december", "Holiday Magic", "Gift Guides", "Year in review", PillarKind::FamilyBonding),
];

/// Theme for a 1-based month number. Out-of-range months wrap.
pub fn monthly_theme(month: u32) -> MonthlyTheme {
  let (name, primary, secondary, focus, _) = MONTHLY_THEMES[month_index(month)];
  MonthlyTheme {
    month: name.to_string(),
    primary_theme: primary.to_string(),
    secondary_theme: secondary.to_string(),
    special_focus: focus.to_string(),
  }
}

/// Pillar that best matches a month's primary theme.
pub fn theme_pillar(month: u32) -> PillarKind {
  MONTHLY_THEMES[month_index(month)].4
}

fn month_index(month: u32) -> usize {
  (month.max(1) as usize - 1) % 12
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_distribution_is_monday_first() {
    let days: Vec<Weekday> = weekly_distribution().iter().map(|s| s.weekday).collect();
    assert_eq!(days.first(), Some(&Weekday::Mon));
    assert_eq!(days.last(), Some(&Weekday::Sun));
    assert_eq!(day_slot(Weekday::Fri).content_type, "Challenge/Reaction");
    assert!(day_slot(Weekday::Sat).pillar.is_none());
  }

  #[test]
  fn test_monthly_theme_lookup() {
    let june = monthly_theme(6);
    assert_eq!(june.month, "june");
    assert_eq!(june.primary_theme, "Summer Adventures");
    assert_eq!(theme_pillar(6), PillarKind::DailyAdventures);
    assert_eq!(theme_pillar(8), PillarKind::ParentingHacks);
  }
}
