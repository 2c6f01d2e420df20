//! Device trust: pending → trusted | revoked, trusted → revoked.
//! Revoked is terminal; rejecting a never-trusted device also lands there.

use crate::errors::{AppError, AppResult};
use crate::models::device::{DeviceAction, DeviceRegistration, DeviceStatus, DeviceTransition};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub struct DeviceTrustWorkflow;

impl DeviceTrustWorkflow {
    /// Transition table. `None` means the action is not allowed from `from`.
    pub fn target_status(from: DeviceStatus, action: DeviceAction) -> Option<DeviceStatus> {
        match (from, action) {
            (DeviceStatus::Pending, DeviceAction::Approve) => Some(DeviceStatus::Trusted),
            (DeviceStatus::Pending, DeviceAction::Reject) => Some(DeviceStatus::Revoked),
            (DeviceStatus::Trusted, DeviceAction::Revoke) => Some(DeviceStatus::Revoked),
            _ => None,
        }
    }

    pub fn transition(
        device: &DeviceRegistration,
        action: DeviceAction,
        now: DateTime<Utc>,
    ) -> AppResult<DeviceRegistration> {
        let Some(to) = Self::target_status(device.status, action) else {
            warn!(
                device = %device.id,
                status = %device.status,
                action = action.as_str(),
                "device transition refused"
            );
            return Err(AppError::InvalidState {
                entity: "device",
                id: device.id.clone(),
                state: device.status.to_string(),
                action: action.as_str().to_string(),
            });
        };

        let mut updated = device.clone();
        updated.history.push(DeviceTransition {
            from: device.status,
            to,
            at: now,
        });
        updated.status = to;
        updated.status_changed_at = Some(now);

        debug!(device = %updated.id, from = %device.status, to = %to, "device transition applied");
        Ok(updated)
    }

    pub fn approve(device: &DeviceRegistration, now: DateTime<Utc>) -> AppResult<DeviceRegistration> {
        Self::transition(device, DeviceAction::Approve, now)
    }

    pub fn reject(device: &DeviceRegistration, now: DateTime<Utc>) -> AppResult<DeviceRegistration> {
        Self::transition(device, DeviceAction::Reject, now)
    }

    pub fn revoke(device: &DeviceRegistration, now: DateTime<Utc>) -> AppResult<DeviceRegistration> {
        Self::transition(device, DeviceAction::Revoke, now)
    }
}
