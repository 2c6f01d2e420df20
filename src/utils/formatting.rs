//! Formatting utilities used for CLI and export outputs.

use crate::core::time_parser::{format_minute_of_day, minute_of_day};
use chrono::{DateTime, FixedOffset};
use unicode_width::UnicodeWidthStr;

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Decimal hours with two places, e.g. `8.42`.
pub fn format_hours(minutes: i64) -> String {
    format!("{:.2}", minutes as f64 / 60.0)
}

/// Wall-clock time of a stamp in 12-hour form, or `--:--`.
pub fn format_stamp(stamp: Option<&DateTime<FixedOffset>>) -> String {
    stamp
        .map(|s| format_minute_of_day(minute_of_day(s)))
        .unwrap_or_else(|| "--:--".to_string())
}

/// Pad to `width` terminal columns; wide glyphs count double.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(UnicodeWidthStr::width(s));
    format!("{s}{}", " ".repeat(pad))
}
