//! Late-arrival classification against the expected clock-in.

use crate::core::calculator::stats::percent;
use crate::core::time_parser::{MinuteOfDay, minute_of_day, parse_minute_of_day};
use crate::models::attendance::DayAttendanceRecord;
use crate::models::schedule::ExpectedSchedule;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lateness {
    Late,
    OnTime,
    /// Missing or unparsable time on either side. Not actionable.
    Unknown,
}

impl Lateness {
    pub fn label(&self) -> &'static str {
        match self {
            Lateness::Late => "Late",
            Lateness::OnTime => "On-Time",
            Lateness::Unknown => "Unknown",
        }
    }

    pub(crate) fn sort_rank(&self) -> u8 {
        match self {
            Lateness::Late => 0,
            Lateness::OnTime => 1,
            Lateness::Unknown => 2,
        }
    }
}

/// Equal minutes are on time; only a strictly later clock-in is late.
pub fn compare_minutes(actual: Option<MinuteOfDay>, expected: Option<MinuteOfDay>) -> Lateness {
    match (actual, expected) {
        (Some(a), Some(e)) if a > e => Lateness::Late,
        (Some(_), Some(_)) => Lateness::OnTime,
        _ => Lateness::Unknown,
    }
}

/// String form: both sides go through the time parser, failures yield Unknown.
pub fn classify_times(actual: Option<&str>, expected: Option<&str>) -> Lateness {
    compare_minutes(
        actual.and_then(|a| parse_minute_of_day(a).ok()),
        expected.and_then(|e| parse_minute_of_day(e).ok()),
    )
}

pub fn classify_lateness(
    record: &DayAttendanceRecord,
    schedule: Option<&ExpectedSchedule>,
) -> Lateness {
    compare_minutes(actual_minutes(record), expected_minutes(schedule))
}

/// Signed minutes between actual and expected clock-in (positive = late).
pub fn late_minutes(
    record: &DayAttendanceRecord,
    schedule: Option<&ExpectedSchedule>,
) -> Option<i64> {
    let actual = actual_minutes(record)?;
    let expected = expected_minutes(schedule)?;
    Some(actual as i64 - expected as i64)
}

/// Whether a late arrival is past the notification grace period.
pub fn is_notifiable_late(late_minutes: i64, grace_minutes: i64) -> bool {
    late_minutes > grace_minutes
}

fn actual_minutes(record: &DayAttendanceRecord) -> Option<MinuteOfDay> {
    record.clock_in.as_ref().map(minute_of_day)
}

fn expected_minutes(schedule: Option<&ExpectedSchedule>) -> Option<MinuteOfDay> {
    schedule.and_then(|s| parse_minute_of_day(&s.clock_in_time).ok())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LatenessSummary {
    pub late_days: usize,
    pub on_time_days: usize,
    pub unknown_days: usize,
    /// on_time / (late + on_time); Unknown days do not count.
    pub punctuality_rate_percent: u32,
}

pub fn summarize_lateness(
    records: &[DayAttendanceRecord],
    schedule: Option<&ExpectedSchedule>,
) -> LatenessSummary {
    let mut summary = LatenessSummary::default();

    for r in records {
        match classify_lateness(r, schedule) {
            Lateness::Late => summary.late_days += 1,
            Lateness::OnTime => summary.on_time_days += 1,
            Lateness::Unknown => summary.unknown_days += 1,
        }
    }

    summary.punctuality_rate_percent = percent(
        summary.on_time_days,
        summary.late_days + summary.on_time_days,
    );
    summary
}
