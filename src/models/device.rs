use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Pending,
    Trusted,
    Revoked,
}

impl DeviceStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DeviceStatus::Pending => "pending",
            DeviceStatus::Trusted => "trusted",
            DeviceStatus::Revoked => "revoked",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DeviceStatus::Pending),
            "trusted" => Some(DeviceStatus::Trusted),
            "revoked" => Some(DeviceStatus::Revoked),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceAction {
    Approve,
    Reject,
    Revoke,
}

impl DeviceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceAction::Approve => "approve",
            DeviceAction::Reject => "reject",
            DeviceAction::Revoke => "revoke",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTransition {
    pub from: DeviceStatus,
    pub to: DeviceStatus,
    pub at: DateTime<Utc>,
}

/// A physical device a subject clocks from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRegistration {
    pub id: String,
    pub subject_id: String,
    pub fingerprint: String,
    pub status: DeviceStatus,
    pub registered_at: DateTime<Utc>,
    pub device_name: Option<String>,
    pub owning_org_id: Option<String>,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub history: Vec<DeviceTransition>,
}

impl DeviceRegistration {
    pub fn new_pending(
        id: impl Into<String>,
        subject_id: impl Into<String>,
        fingerprint: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            fingerprint: fingerprint.into(),
            status: DeviceStatus::Pending,
            registered_at,
            device_name: None,
            owning_org_id: None,
            status_changed_at: None,
            history: Vec::new(),
        }
    }
}
