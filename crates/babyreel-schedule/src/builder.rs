use std::collections::BTreeMap;

use babyreel_content::{DayPlan, WeeklyPlan, weekday_name};
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Days before publishing at which a reminder fires.
const REMINDER_OFFSETS: [u64; 3] = [3, 1, 0];

/// Default publish hour per weekday, Monday first.
const DEFAULT_HOURS: [u32; 7] = [9, 10, 14, 11, 15, 10, 16];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
  Scheduled,
}

/// One day's publish record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
  pub date: NaiveDate,
  pub day: String,
  pub time: NaiveTime,
  pub title: String,
  /// Pillar display name.
  pub pillar: String,
  pub content_type: String,
  pub video_length: String,
  pub status: EntryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
  PublishingReminder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
  pub date: NaiveDate,
  #[serde(rename = "type")]
  pub kind: ReminderKind,
  /// Title of the video the reminder is for.
  pub content: String,
  pub days_until: u64,
}

/// A week of publishing slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
  pub week_start: NaiveDate,
  pub week_end: NaiveDate,
  /// Weekday name to that day's entry.
  pub publishing_schedule: BTreeMap<String, ScheduleEntry>,
  /// The same entries keyed by publish date.
  pub content_calendar: BTreeMap<NaiveDate, ScheduleEntry>,
  /// Ordered by video, then by firing date.
  pub reminders: Vec<Reminder>,
}

/// Builds schedules from weekly plans.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
  times: [NaiveTime; 7],
}

impl Default for ScheduleBuilder {
  fn default() -> Self {
    Self {
      times: DEFAULT_HOURS.map(|hour| NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)),
    }
  }
}

impl ScheduleBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Override the default publish time for a weekday.
  pub fn with_time(mut self, weekday: Weekday, time: NaiveTime) -> Self {
    self.times[weekday.num_days_from_monday() as usize] = time;
    self
  }

  pub fn default_time(&self, weekday: Weekday) -> NaiveTime {
    self.times[weekday.num_days_from_monday() as usize]
  }

  fn publish_time(&self, day: &DayPlan) -> NaiveTime {
    day
      .publishing_time
      .unwrap_or_else(|| self.default_time(day.date.weekday()))
  }

  pub fn build(&self, plan: &WeeklyPlan) -> Result<Schedule, ScheduleError> {
    if plan.content_schedule.is_empty() {
      return Err(ScheduleError::EmptyPlan);
    }

    let mut publishing_schedule = BTreeMap::new();
    let mut content_calendar = BTreeMap::new();
    let mut reminders = Vec::with_capacity(plan.content_schedule.len() * REMINDER_OFFSETS.len());

    for day in &plan.content_schedule {
      let time = self.publish_time(day);
      let name = weekday_name(day.date.weekday()).to_string();

      let entry = ScheduleEntry {
        date: day.date,
        day: name.clone(),
        time,
        title: day.idea.suggested_title.clone(),
        pillar: day.idea.pillar.clone(),
        content_type: day.content_type.clone(),
        video_length: day.video_length.clone(),
        status: EntryStatus::Scheduled,
      };
      if content_calendar.insert(day.date, entry.clone()).is_some() {
        return Err(ScheduleError::DuplicateDate(day.date));
      }
      publishing_schedule.insert(name, entry);

      for days_until in REMINDER_OFFSETS {
        let date = day
          .date
          .checked_sub_days(Days::new(days_until))
          .ok_or(ScheduleError::DateOutOfRange(day.date))?;
        reminders.push(Reminder {
          date,
          kind: ReminderKind::PublishingReminder,
          content: day.idea.suggested_title.clone(),
          days_until,
        });
      }
    }

    Ok(Schedule {
      week_start: plan.week_start,
      week_end: plan.week_end,
      publishing_schedule,
      content_calendar,
      reminders,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use babyreel_content::{IdeaProvider, Taxonomy, TemplateIdeaGenerator};

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  async fn plan(start: NaiveDate) -> WeeklyPlan {
    TemplateIdeaGenerator::with_seed(Arc::new(Taxonomy::builtin()), 42)
      .weekly_plan(start)
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_reminders_for_monday() {
    let monday = date(2024, 6, 10);
    let schedule = ScheduleBuilder::new().build(&plan(monday).await).unwrap();

    let reminders: Vec<&Reminder> = schedule
      .reminders
      .iter()
      .filter(|r| r.content == schedule.content_calendar[&monday].title)
      .take(3)
      .collect();
    let dates: Vec<NaiveDate> = reminders.iter().map(|r| r.date).collect();
    let until: Vec<u64> = reminders.iter().map(|r| r.days_until).collect();

    assert_eq!(dates, vec![date(2024, 6, 7), date(2024, 6, 9), date(2024, 6, 10)]);
    assert_eq!(until, vec![3, 1, 0]);
    assert_eq!(schedule.reminders.len(), 21);
  }

  #[tokio::test]
  async fn test_default_times_by_weekday() {
    let schedule = ScheduleBuilder::new()
      .build(&plan(date(2024, 6, 10)).await)
      .unwrap();

    let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
    assert_eq!(schedule.publishing_schedule["monday"].time, at(9));
    assert_eq!(schedule.publishing_schedule["wednesday"].time, at(14));
    assert_eq!(schedule.publishing_schedule["sunday"].time, at(16));
    assert_eq!(schedule.content_calendar.len(), 7);
    assert_eq!(schedule.content_calendar[&date(2024, 6, 14)].day, "friday");
  }

  #[tokio::test]
  async fn test_weekday_entries_carry_full_record() {
    let monday = date(2024, 6, 10);
    let plan = plan(monday).await;
    let schedule = ScheduleBuilder::new().build(&plan).unwrap();

    assert_eq!(schedule.publishing_schedule.len(), 7);
    let friday = &schedule.publishing_schedule["friday"];
    assert_eq!(friday.date, date(2024, 6, 14));
    assert_eq!(friday.status, EntryStatus::Scheduled);
    assert_eq!(friday.title, plan.content_schedule[4].idea.suggested_title);
    assert_eq!(friday.content_type, plan.content_schedule[4].content_type);
    assert_eq!(friday, &schedule.content_calendar[&friday.date]);

    let json = serde_json::to_value(&schedule).unwrap();
    let monday_json = &json["publishing_schedule"]["monday"];
    assert_eq!(monday_json["date"], "2024-06-10");
    assert_eq!(monday_json["time"], "09:00:00");
    assert_eq!(monday_json["status"], "scheduled");
  }

  #[tokio::test]
  async fn test_explicit_time_wins() {
    let mut plan = plan(date(2024, 6, 10)).await;
    let noon = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
    plan.content_schedule[0].publishing_time = Some(noon);

    let schedule = ScheduleBuilder::new().build(&plan).unwrap();
    assert_eq!(schedule.content_calendar[&date(2024, 6, 10)].time, noon);
  }

  #[tokio::test]
  async fn test_build_is_idempotent() {
    let plan = plan(date(2024, 6, 10)).await;
    let builder = ScheduleBuilder::new();
    let first = serde_json::to_string(&builder.build(&plan).unwrap()).unwrap();
    let second = serde_json::to_string(&builder.build(&plan).unwrap()).unwrap();
    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn test_empty_plan_fails() {
    let mut plan = plan(date(2024, 6, 10)).await;
    plan.content_schedule.clear();
    assert!(matches!(
      ScheduleBuilder::new().build(&plan),
      Err(ScheduleError::EmptyPlan)
    ));
  }

  #[tokio::test]
  async fn test_duplicate_date_fails() {
    let mut plan = plan(date(2024, 6, 10)).await;
    let first = plan.content_schedule[0].clone();
    plan.content_schedule.push(first);
    assert!(matches!(
      ScheduleBuilder::new().build(&plan),
      Err(ScheduleError::DuplicateDate(_))
    ));
  }
}
