//! Database row models for organizations and subjects.
//! Thin wrappers around SQLite rows; schedules are kept as entered.

use crate::models::schedule::WorkingHours;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationRow {
    pub id: String,
    pub name: String,
    pub default_hours: WorkingHours,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectRow {
    pub id: String,
    pub name: String,
    /// Host company that registered the subject.
    pub org_id: Option<String>,
    pub hours: WorkingHours,
}
