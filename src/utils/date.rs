use crate::errors::AppResult;
use crate::models::date_range::DateRange;
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// `--range` value, or the current month when absent. `all` is not a range
/// here: timesheets are always bounded.
pub fn resolve_range(range: Option<&str>) -> AppResult<DateRange> {
    match range {
        Some(r) => DateRange::parse(r),
        None => Ok(DateRange::month_of(today())),
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
