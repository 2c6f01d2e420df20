use crate::models::period_summary::ClassifiedDay;
use crate::utils::formatting::format_stamp;
use serde::Serialize;

/// Flat per-day row for CSV / JSON.
#[derive(Serialize, Clone, Debug)]
pub struct DayExport {
    pub subject_id: String,
    pub date: String,
    pub clock_in: String,
    pub break_start: String,
    pub break_end: String,
    pub clock_out: String,
    pub hours_worked: f64,
    pub complete: bool,
    pub lateness: String,
}

impl DayExport {
    pub fn from_day(subject_id: &str, day: &ClassifiedDay) -> Self {
        let r = &day.record;
        Self {
            subject_id: subject_id.to_string(),
            date: r.date_str(),
            clock_in: format_stamp(r.clock_in.as_ref()),
            break_start: format_stamp(r.break_start.as_ref()),
            break_end: format_stamp(r.break_end.as_ref()),
            clock_out: format_stamp(r.clock_out.as_ref()),
            hours_worked: (r.hours_worked() * 100.0).round() / 100.0,
            complete: r.is_complete,
            lateness: day.lateness.label().to_string(),
        }
    }
}
