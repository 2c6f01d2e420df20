use crate::core::calculator::lateness::{Lateness, LatenessSummary};
use crate::core::calculator::stats::AttendanceStats;
use crate::models::attendance::DayAttendanceRecord;
use crate::models::date_range::DateRange;
use crate::models::schedule::ExpectedSchedule;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedDay {
    pub record: DayAttendanceRecord,
    pub lateness: Lateness,
    /// Signed minutes past the expected clock-in, when both sides parse.
    pub late_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub subject_id: String,
    pub range: DateRange,
    pub schedule: Option<ExpectedSchedule>,
    pub days: Vec<ClassifiedDay>,
    pub stats: AttendanceStats,
    pub punctuality: LatenessSummary,
    pub unattended: Vec<NaiveDate>,
}

impl PeriodSummary {
    /// Late days first, then on-time, then unknown; by date within a group.
    pub fn sort_late_first(&mut self) {
        self.days.sort_by_key(|d| (d.lateness.sort_rank(), d.record.date));
    }

    pub fn records(&self) -> Vec<DayAttendanceRecord> {
        self.days.iter().map(|d| d.record.clone()).collect()
    }
}
