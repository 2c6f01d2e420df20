//! Time-of-day parsing shared by aggregation, lateness and the CLI.
//!
//! Everything reduces to a minute-of-day in `0..=1439`. Accepted inputs:
//! - 12-hour clock: `7:45 AM`, `07:45:30 pm`, `7:45PM`, `7:45 a.m.`
//! - 24-hour clock: `07:45`, `19:05:00`
//! - ISO-8601 / RFC 3339 timestamps: the time-of-day is read in the
//!   timestamp's own offset.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub type MinuteOfDay = u16;

pub const MINUTES_PER_DAY: MinuteOfDay = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("empty time string")]
    Empty,

    #[error("unrecognized time '{0}'")]
    Unrecognized(String),

    #[error("time out of range '{0}'")]
    OutOfRange(String),
}

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::(\d{2}))?\s*([ap])\.?\s*m?\.?$|^(\d{1,2}):(\d{2})(?::(\d{2}))?$")
        .expect("clock regex is valid")
});

const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a clock string or timestamp into a minute-of-day.
pub fn parse_minute_of_day(input: &str) -> Result<MinuteOfDay, TimeParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Some(caps) = CLOCK_RE.captures(s) {
        // Group layout: 1-4 for 12-hour, 5-7 for 24-hour.
        let (h, m, sec, meridiem) = match caps.get(4) {
            Some(mer) => (caps.get(1), caps.get(2), caps.get(3), Some(mer.as_str())),
            None => (caps.get(5), caps.get(6), caps.get(7), None),
        };

        let out_of_range = || TimeParseError::OutOfRange(s.to_string());
        let hour: u16 = h
            .and_then(|v| v.as_str().parse().ok())
            .ok_or_else(out_of_range)?;
        let minute: u16 = m
            .and_then(|v| v.as_str().parse().ok())
            .ok_or_else(out_of_range)?;

        if minute > 59 {
            return Err(out_of_range());
        }
        if let Some(sec) = sec {
            let sec: u16 = sec.as_str().parse().map_err(|_| out_of_range())?;
            if sec > 59 {
                return Err(out_of_range());
            }
        }

        let hour24 = match meridiem {
            Some(mer) => {
                if !(1..=12).contains(&hour) {
                    return Err(out_of_range());
                }
                let pm = mer.eq_ignore_ascii_case("p");
                (hour % 12) + if pm { 12 } else { 0 }
            }
            None => {
                if hour > 23 {
                    return Err(out_of_range());
                }
                hour
            }
        };

        return Ok(hour24 * 60 + minute);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(minute_of_day(&dt));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| minute_of_day(&dt))
        .ok_or_else(|| TimeParseError::Unrecognized(s.to_string()))
}

/// Minute-of-day of anything carrying a wall-clock time.
pub fn minute_of_day<T: Timelike>(t: &T) -> MinuteOfDay {
    (t.hour() * 60 + t.minute()) as MinuteOfDay
}

/// Render a minute-of-day in the 12-hour form used across the console.
pub fn format_minute_of_day(m: MinuteOfDay) -> String {
    let m = m % MINUTES_PER_DAY;
    let (h, min) = (m / 60, m % 60);
    let (h12, mer) = match h {
        0 => (12, "AM"),
        1..=11 => (h, "AM"),
        12 => (12, "PM"),
        _ => (h - 12, "PM"),
    };
    format!("{h12}:{min:02} {mer}")
}

/// Parse a full timestamp. Naive inputs are placed in `default_offset`.
pub fn parse_timestamp(
    input: &str,
    default_offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| default_offset.from_local_datetime(&naive).single())
        .ok_or_else(|| TimeParseError::Unrecognized(s.to_string()))
}
