use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Admin,
    HostCompany,
}

/// The acting user. Only used to decide review rights, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerContext {
    pub id: String,
    pub role: ReviewerRole,
    #[serde(default)]
    pub org_id: Option<String>,
}

impl ReviewerContext {
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ReviewerRole::Admin,
            org_id: None,
        }
    }

    pub fn host_company(id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: ReviewerRole::HostCompany,
            org_id: Some(org_id.into()),
        }
    }
}
