//! Who may act on what.
//!
//! Admins review everything. A host company reviews only what belongs to its
//! own organization; anything else it can see is view-only.

use crate::models::device::DeviceRegistration;
use crate::models::request::ApprovableRequest;
use crate::models::reviewer::{ReviewerContext, ReviewerRole};
use serde::Serialize;

/// Anything that records the organization which registered its subject.
pub trait OrgOwned {
    fn owning_org_id(&self) -> Option<&str>;
}

impl<T> OrgOwned for ApprovableRequest<T> {
    fn owning_org_id(&self) -> Option<&str> {
        self.owning_org_id.as_deref()
    }
}

impl OrgOwned for DeviceRegistration {
    fn owning_org_id(&self) -> Option<&str> {
        self.owning_org_id.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAccess {
    Actionable,
    ViewOnly,
}

pub struct ReviewAuthorizationPolicy;

impl ReviewAuthorizationPolicy {
    /// Pure predicate; evaluate before every transition attempt.
    ///
    /// A host-company reviewer without an org id, or a subject without an
    /// owning org, never matches.
    pub fn can_review<R: OrgOwned + ?Sized>(reviewer: &ReviewerContext, item: &R) -> bool {
        match reviewer.role {
            ReviewerRole::Admin => true,
            ReviewerRole::HostCompany => match (reviewer.org_id.as_deref(), item.owning_org_id()) {
                (Some(mine), Some(owner)) => mine == owner,
                _ => false,
            },
        }
    }

    pub fn review_access<R: OrgOwned + ?Sized>(reviewer: &ReviewerContext, item: &R) -> ReviewAccess {
        if Self::can_review(reviewer, item) {
            ReviewAccess::Actionable
        } else {
            ReviewAccess::ViewOnly
        }
    }
}
