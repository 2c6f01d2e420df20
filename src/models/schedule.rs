use serde::{Deserialize, Serialize};

/// Working hours as stored on a subject or a host company. Any field may be
/// missing; times are kept as entered (`"7:30 AM"`, `"07:30"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub clock_in_time: Option<String>,
    pub clock_out_time: Option<String>,
    pub break_start_time: Option<String>,
    pub break_end_time: Option<String>,
}

impl WorkingHours {
    pub fn new(clock_in: &str, clock_out: &str) -> Self {
        Self {
            clock_in_time: Some(clock_in.to_string()),
            clock_out_time: Some(clock_out.to_string()),
            ..Default::default()
        }
    }

    pub fn with_break(mut self, start: &str, end: &str) -> Self {
        self.break_start_time = Some(start.to_string());
        self.break_end_time = Some(end.to_string());
        self
    }

    /// Clock-in and clock-out both set and non-blank.
    fn is_usable(&self) -> bool {
        non_blank(&self.clock_in_time).is_some() && non_blank(&self.clock_out_time).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    Individual,
    HostCompany,
}

/// Schedule a subject is expected to follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedSchedule {
    pub clock_in_time: String,
    pub clock_out_time: String,
    pub break_start_time: Option<String>,
    pub break_end_time: Option<String>,
    pub source: ScheduleSource,
}

impl ExpectedSchedule {
    /// Individual assignment first, then the host-company default.
    /// `None` means lateness cannot be evaluated for this subject.
    pub fn resolve(
        individual: Option<&WorkingHours>,
        host_default: Option<&WorkingHours>,
    ) -> Option<Self> {
        if let Some(hours) = individual.filter(|h| h.is_usable()) {
            return Self::from_hours(hours, ScheduleSource::Individual);
        }

        host_default
            .filter(|h| h.is_usable())
            .and_then(|h| Self::from_hours(h, ScheduleSource::HostCompany))
    }

    fn from_hours(hours: &WorkingHours, source: ScheduleSource) -> Option<Self> {
        Some(Self {
            clock_in_time: non_blank(&hours.clock_in_time)?,
            clock_out_time: non_blank(&hours.clock_out_time)?,
            break_start_time: non_blank(&hours.break_start_time),
            break_end_time: non_blank(&hours.break_end_time),
            source,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
