use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEventKind {
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
}

impl ClockEventKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ClockEventKind::ClockIn => "in",
            ClockEventKind::ClockOut => "out",
            ClockEventKind::BreakStart => "break_start",
            ClockEventKind::BreakEnd => "break_end",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(ClockEventKind::ClockIn),
            "out" => Some(ClockEventKind::ClockOut),
            "break_start" => Some(ClockEventKind::BreakStart),
            "break_end" => Some(ClockEventKind::BreakEnd),
            _ => None,
        }
    }

    /// Lenient parser for CLI input (`in`, `clock-out`, `break-start`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "in" | "clock_in" => Some(ClockEventKind::ClockIn),
            "out" | "clock_out" => Some(ClockEventKind::ClockOut),
            "break_start" | "start_break" => Some(ClockEventKind::BreakStart),
            "break_end" | "end_break" => Some(ClockEventKind::BreakEnd),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClockEventKind::ClockIn => "Clock in",
            ClockEventKind::ClockOut => "Clock out",
            ClockEventKind::BreakStart => "Break start",
            ClockEventKind::BreakEnd => "Break end",
        }
    }
}

/// A raw event produced by the capture system. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    pub subject_id: String,
    pub timestamp: DateTime<FixedOffset>,
    pub kind: ClockEventKind,
    /// Recognition confidence, 0..=100.
    pub confidence: u8,
}

impl ClockEvent {
    pub fn new(
        subject_id: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        kind: ClockEventKind,
        confidence: u8,
    ) -> AppResult<Self> {
        if confidence > 100 {
            return Err(AppError::Validation(format!(
                "confidence must be within 0..=100, got {confidence}"
            )));
        }

        Ok(Self {
            subject_id: subject_id.into(),
            timestamp,
            kind,
            confidence,
        })
    }

    /// Calendar date of the event in the offset it was captured with.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}
