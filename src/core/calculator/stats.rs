use crate::models::attendance::DayAttendanceRecord;
use crate::models::date_range::DateRange;
use crate::models::schedule::ExpectedSchedule;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub days_recorded: usize,
    pub complete_days: usize,
    pub incomplete_days: usize,
    pub attendance_rate_percent: u32,
    pub total_minutes_worked: i64,
}

impl AttendanceStats {
    pub fn total_hours_worked(&self) -> f64 {
        self.total_minutes_worked as f64 / 60.0
    }

    pub fn average_hours_per_complete_day(&self) -> f64 {
        if self.complete_days == 0 {
            return 0.0;
        }
        self.total_hours_worked() / self.complete_days as f64
    }
}

/// Period statistics. Order-independent.
pub fn compute_stats(records: &[DayAttendanceRecord]) -> AttendanceStats {
    let days_recorded = records.len();
    let complete_days = records.iter().filter(|r| r.is_complete).count();

    AttendanceStats {
        days_recorded,
        complete_days,
        incomplete_days: days_recorded - complete_days,
        attendance_rate_percent: percent(complete_days, days_recorded),
        total_minutes_worked: records.iter().map(|r| r.minutes_worked).sum(),
    }
}

/// round(part / whole * 100), half up; 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Weekdays in `range` with no clock-in, while a schedule says the subject
/// was expected. Empty when no schedule is resolved.
pub fn unattended_weekdays(
    range: &DateRange,
    records: &[DayAttendanceRecord],
    schedule: Option<&ExpectedSchedule>,
) -> Vec<NaiveDate> {
    if schedule.is_none() {
        return Vec::new();
    }

    let attended: HashSet<NaiveDate> = records
        .iter()
        .filter(|r| r.clock_in.is_some())
        .map(|r| r.date)
        .collect();

    range
        .days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|d| !attended.contains(d))
        .collect()
}
