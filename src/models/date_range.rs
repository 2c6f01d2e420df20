use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidDate(format!(
                "range end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn month_of(day: NaiveDate) -> Self {
        let start = day.with_day(1).unwrap_or(day);
        let end = last_day_of_month(start.year(), start.month()).unwrap_or(start);
        Self { start, end }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Parse a period expression.
    ///
    /// Accepts:
    /// - YYYY
    /// - YYYY-MM
    /// - YYYY-MM-DD
    /// - YYYY:YYYY
    /// - YYYY-MM:YYYY-MM
    /// - YYYY-MM-DD:YYYY-MM-DD
    pub fn parse(expr: &str) -> AppResult<Self> {
        let expr = expr.trim();

        if let Some((start_raw, end_raw)) = expr.split_once(':') {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(AppError::InvalidDate(format!(
                    "start and end must have the same format: {expr}"
                )));
            }

            let first = Self::parse_period(start)?;
            let last = Self::parse_period(end)?;
            return Self::new(first.start, last.end);
        }

        Self::parse_period(expr)
    }

    fn parse_period(p: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidDate(p.to_string());

        match p.len() {
            // YYYY
            4 => {
                let y: i32 = p.parse().map_err(|_| invalid())?;
                let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
                let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
                Ok(Self { start: d1, end: d2 })
            }
            // YYYY-MM
            7 => {
                let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                    .map_err(|_| invalid())?;
                Ok(Self::month_of(first))
            }
            // YYYY-MM-DD
            10 => {
                let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(Self::single(d))
            }
            _ => Err(invalid()),
        }
    }
}

fn last_day_of_month(y: i32, m: u32) -> Option<NaiveDate> {
    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}
