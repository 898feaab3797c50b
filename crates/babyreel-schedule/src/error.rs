use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
  #[error("weekly plan has no days")]
  EmptyPlan,

  #[error("weekly plan lists {0} more than once")]
  DuplicateDate(NaiveDate),

  #[error("reminder date out of range for {0}")]
  DateOutOfRange(NaiveDate),
}
