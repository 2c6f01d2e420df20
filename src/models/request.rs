use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

// ---------------------------------------------------------------------------
// Correction vocabulary
// ---------------------------------------------------------------------------

/// Kind of attendance correction being asked for. Unknown codes are kept
/// verbatim in `Other` so nothing is lost on a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionType {
    MissingClockIn,
    MissingClockOut,
    WrongTime,
    MissingBreak,
    Other(String),
}

impl CorrectionType {
    /// Total: any input maps to a variant.
    pub fn parse(code: &str) -> Self {
        match code.trim().to_lowercase().replace('-', "_").as_str() {
            "missing_clock_in" => CorrectionType::MissingClockIn,
            "missing_clock_out" => CorrectionType::MissingClockOut,
            "wrong_time" => CorrectionType::WrongTime,
            "missing_break" => CorrectionType::MissingBreak,
            "other" | "" => CorrectionType::Other(String::new()),
            _ => CorrectionType::Other(code.trim().to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            CorrectionType::MissingClockIn => "missing_clock_in",
            CorrectionType::MissingClockOut => "missing_clock_out",
            CorrectionType::WrongTime => "wrong_time",
            CorrectionType::MissingBreak => "missing_break",
            CorrectionType::Other(raw) if raw.is_empty() => "other",
            CorrectionType::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> String {
        match self {
            CorrectionType::MissingClockIn => "Missing Clock-In".to_string(),
            CorrectionType::MissingClockOut => "Missing Clock-Out".to_string(),
            CorrectionType::WrongTime => "Wrong Time".to_string(),
            CorrectionType::MissingBreak => "Missing Break".to_string(),
            CorrectionType::Other(raw) if raw.is_empty() => "Other".to_string(),
            CorrectionType::Other(raw) => format!("Other ({raw})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaveType {
    Annual,
    Sick,
    StudyLeave,
    FamilyResponsibility,
    Other,
}

impl LeaveType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "annual" => LeaveType::Annual,
            "sick" => LeaveType::Sick,
            "study" | "study leave" => LeaveType::StudyLeave,
            "family" | "family responsibility" => LeaveType::FamilyResponsibility,
            _ => LeaveType::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Annual",
            LeaveType::Sick => "Sick",
            LeaveType::StudyLeave => "Study Leave",
            LeaveType::FamilyResponsibility => "Family Responsibility",
            LeaveType::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Names the concrete request kind in messages and audit entries.
pub trait RequestKind {
    const ENTITY: &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveDetails {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_days: f64,
    pub reason: String,
}

impl LeaveDetails {
    pub fn new(
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        number_of_days: f64,
        reason: &str,
    ) -> AppResult<Self> {
        if end_date < start_date {
            return Err(AppError::Validation(format!(
                "leave ends ({end_date}) before it starts ({start_date})"
            )));
        }
        if number_of_days < 0.5 {
            return Err(AppError::Validation(
                "number of leave days must be at least 0.5".into(),
            ));
        }
        if reason.trim().is_empty() {
            return Err(AppError::Validation("leave reason is required".into()));
        }

        Ok(Self {
            leave_type,
            start_date,
            end_date,
            number_of_days,
            reason: reason.trim().to_string(),
        })
    }
}

impl RequestKind for LeaveDetails {
    const ENTITY: &'static str = "leave application";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionDetails {
    pub date: NaiveDate,
    pub correction_type: CorrectionType,
    pub requested_clock_in: Option<String>,
    pub requested_clock_out: Option<String>,
    pub requested_break_start: Option<String>,
    pub requested_break_end: Option<String>,
    pub description: String,
}

impl CorrectionDetails {
    pub fn new(
        date: NaiveDate,
        correction_type: CorrectionType,
        description: &str,
    ) -> AppResult<Self> {
        if description.trim().is_empty() {
            return Err(AppError::Validation(
                "correction description is required".into(),
            ));
        }

        Ok(Self {
            date,
            correction_type,
            requested_clock_in: None,
            requested_clock_out: None,
            requested_break_start: None,
            requested_break_end: None,
            description: description.trim().to_string(),
        })
    }
}

impl RequestKind for CorrectionDetails {
    const ENTITY: &'static str = "attendance correction";
}

// ---------------------------------------------------------------------------
// ApprovableRequest
// ---------------------------------------------------------------------------

/// A request moving through pending → approved | rejected.
///
/// `rejection_reason` is set exactly when `status == Rejected`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovableRequest<T> {
    pub id: String,
    pub subject_id: String,
    /// Host company that registered the subject, if any.
    pub owning_org_id: Option<String>,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub details: T,
}

pub type LeaveApplication = ApprovableRequest<LeaveDetails>;
pub type AttendanceCorrectionRequest = ApprovableRequest<CorrectionDetails>;

impl<T> ApprovableRequest<T> {
    pub fn new_pending(
        id: impl Into<String>,
        subject_id: impl Into<String>,
        owning_org_id: Option<String>,
        details: T,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            owning_org_id,
            status: RequestStatus::Pending,
            rejection_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            details,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
