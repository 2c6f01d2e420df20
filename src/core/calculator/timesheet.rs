//! Raw clock events → one attendance record per calendar day.

use crate::models::attendance::DayAttendanceRecord;
use crate::models::clock_event::{ClockEvent, ClockEventKind};
use crate::models::date_range::DateRange;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use std::collections::BTreeMap;

/// A subject's reconciled days over a range.
#[derive(Debug, Clone, Default)]
pub struct Timesheet {
    pub subject_id: String,
    pub days: Vec<DayAttendanceRecord>,
}

impl Timesheet {
    /// Keep only `subject_id`'s events, then aggregate them.
    pub fn build(subject_id: &str, events: &[ClockEvent], range: &DateRange) -> Self {
        let own: Vec<ClockEvent> = events
            .iter()
            .filter(|e| e.subject_id == subject_id)
            .cloned()
            .collect();

        Self {
            subject_id: subject_id.to_string(),
            days: aggregate(&own, range),
        }
    }
}

/// Group events by local calendar date and reduce each group to a record.
///
/// Days without events are never materialized. Output is sorted by date and
/// does not depend on input order.
pub fn aggregate(events: &[ClockEvent], range: &DateRange) -> Vec<DayAttendanceRecord> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ClockEvent>> = BTreeMap::new();

    for ev in events {
        let date = ev.local_date();
        if range.contains(date) {
            by_date.entry(date).or_default().push(ev);
        }
    }

    by_date
        .into_iter()
        .map(|(date, mut day_events)| {
            day_events.sort_by_key(|e| e.timestamp);
            build_day(date, &day_events)
        })
        .collect()
}

/// `day_events` must already be sorted by timestamp.
///
/// First ClockIn wins; the last ClockOut, BreakStart and BreakEnd win.
fn build_day(date: NaiveDate, day_events: &[&ClockEvent]) -> DayAttendanceRecord {
    let first = |kind: ClockEventKind| {
        day_events
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.timestamp)
    };
    let last = |kind: ClockEventKind| {
        day_events
            .iter()
            .rev()
            .find(|e| e.kind == kind)
            .map(|e| e.timestamp)
    };

    let clock_in = first(ClockEventKind::ClockIn);
    let clock_out = last(ClockEventKind::ClockOut);
    let break_start = last(ClockEventKind::BreakStart);
    let break_end = last(ClockEventKind::BreakEnd);

    DayAttendanceRecord {
        date,
        clock_in,
        clock_out,
        break_start,
        break_end,
        minutes_worked: net_worked_minutes(clock_in, clock_out, break_start, break_end),
        is_complete: clock_in.is_some() && clock_out.is_some(),
    }
}

type Stamp = Option<DateTime<FixedOffset>>;

/// (out - in) - (break_end - break_start), clamped to zero.
/// The break is only removed when both of its ends are known.
pub fn net_worked_minutes(
    clock_in: Stamp,
    clock_out: Stamp,
    break_start: Stamp,
    break_end: Stamp,
) -> i64 {
    let (Some(cin), Some(cout)) = (clock_in, clock_out) else {
        return 0;
    };

    let span = cout - cin;
    let pause = match (break_start, break_end) {
        (Some(bs), Some(be)) => (be - bs).max(TimeDelta::zero()),
        _ => TimeDelta::zero(),
    };

    (span - pause).max(TimeDelta::zero()).num_minutes()
}
