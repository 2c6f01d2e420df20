use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// One reconciled calendar day for a subject.
///
/// Derived on read, never persisted. `is_complete` is true exactly when both
/// `clock_in` and `clock_out` are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAttendanceRecord {
    pub date: NaiveDate,
    pub clock_in: Option<DateTime<FixedOffset>>,
    pub clock_out: Option<DateTime<FixedOffset>>,
    pub break_start: Option<DateTime<FixedOffset>>,
    pub break_end: Option<DateTime<FixedOffset>>,
    /// Net worked minutes: span minus break, clamped to zero.
    pub minutes_worked: i64,
    pub is_complete: bool,
}

impl DayAttendanceRecord {
    pub fn hours_worked(&self) -> f64 {
        self.minutes_worked as f64 / 60.0
    }

    /// Clock-in to clock-out span without removing the break.
    pub fn span_minutes(&self) -> i64 {
        match (self.clock_in, self.clock_out) {
            (Some(i), Some(o)) => (o - i).num_minutes().max(0),
            _ => 0,
        }
    }

    pub fn break_minutes(&self) -> i64 {
        match (self.break_start, self.break_end) {
            (Some(s), Some(e)) => (e - s).num_minutes().max(0),
            _ => 0,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
