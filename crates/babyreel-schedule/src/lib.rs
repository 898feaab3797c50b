//! Babyreel Schedule
//!
//! Turns a [`WeeklyPlan`](babyreel_content::WeeklyPlan) into a publishing
//! calendar. Each planned day gets a publish time and three reminders
//! (three days before, the day before, and the day itself).
//!
//! Building is pure: the same plan always yields the same schedule.

mod builder;
mod error;

pub use builder::{
  EntryStatus, Reminder, ReminderKind, Schedule, ScheduleBuilder, ScheduleEntry,
};
pub use error::ScheduleError;
