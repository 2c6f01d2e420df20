//! Pending → approved | rejected, shared by leave applications and
//! attendance corrections.

use crate::core::workflow::policy::ReviewAuthorizationPolicy;
use crate::errors::{AppError, AppResult};
use crate::models::device::{DeviceRegistration, DeviceStatus};
use crate::models::request::{
    ApprovableRequest, AttendanceCorrectionRequest, LeaveApplication, RequestKind, RequestStatus,
};
use crate::models::reviewer::ReviewerContext;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

pub struct ApprovalWorkflow;

impl ApprovalWorkflow {
    /// Apply a reviewer's decision and return the updated request.
    ///
    /// Guards, in order: the request is still pending, the reviewer may
    /// review it, a rejection carries a non-blank reason. The input is left
    /// untouched; persisting the result is the caller's second step.
    pub fn submit_decision<T: RequestKind + Clone>(
        request: &ApprovableRequest<T>,
        decision: Decision,
        reviewer: &ReviewerContext,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<ApprovableRequest<T>> {
        if request.status != RequestStatus::Pending {
            warn!(
                entity = T::ENTITY,
                id = %request.id,
                status = %request.status,
                "decision refused: request already decided"
            );
            return Err(AppError::InvalidState {
                entity: T::ENTITY,
                id: request.id.clone(),
                state: request.status.to_string(),
                action: decision.as_str().to_string(),
            });
        }

        if !ReviewAuthorizationPolicy::can_review(reviewer, request) {
            warn!(
                entity = T::ENTITY,
                id = %request.id,
                reviewer = %reviewer.id,
                "decision refused: reviewer does not own the request"
            );
            return Err(AppError::Unauthorized(format!(
                "reviewer {} may not review {} {}",
                reviewer.id,
                T::ENTITY,
                request.id
            )));
        }

        let mut updated = request.clone();

        match decision {
            Decision::Approve => {
                updated.status = RequestStatus::Approved;
                updated.rejection_reason = None;
            }
            Decision::Reject => {
                let reason = reason
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(format!(
                            "a rejection reason is required to reject {} {}",
                            T::ENTITY,
                            request.id
                        ))
                    })?;
                updated.status = RequestStatus::Rejected;
                updated.rejection_reason = Some(reason.to_string());
            }
        }

        updated.reviewed_by = Some(reviewer.id.clone());
        updated.reviewed_at = Some(now);

        debug!(
            entity = T::ENTITY,
            id = %updated.id,
            status = %updated.status,
            reviewer = %reviewer.id,
            "decision applied"
        );
        Ok(updated)
    }
}

/// Pending items a reviewer can act on. Recomputed after every transition
/// from a fresh read, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingCounts {
    pub leave_applications: usize,
    pub attendance_corrections: usize,
    pub devices: usize,
}

impl PendingCounts {
    pub fn compute(
        reviewer: &ReviewerContext,
        leave: &[LeaveApplication],
        corrections: &[AttendanceCorrectionRequest],
        devices: &[DeviceRegistration],
    ) -> Self {
        Self {
            leave_applications: actionable_pending(reviewer, leave),
            attendance_corrections: actionable_pending(reviewer, corrections),
            devices: devices
                .iter()
                .filter(|d| d.status == DeviceStatus::Pending)
                .filter(|d| ReviewAuthorizationPolicy::can_review(reviewer, *d))
                .count(),
        }
    }

    pub fn total(&self) -> usize {
        self.leave_applications + self.attendance_corrections + self.devices
    }
}

fn actionable_pending<T>(reviewer: &ReviewerContext, requests: &[ApprovableRequest<T>]) -> usize {
    requests
        .iter()
        .filter(|r| r.is_pending())
        .filter(|r| ReviewAuthorizationPolicy::can_review(reviewer, *r))
        .count()
}
