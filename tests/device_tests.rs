use chrono::{Duration, TimeZone, Utc};
use clockdesk::core::workflow::device::DeviceTrustWorkflow;
use clockdesk::errors::AppError;
use clockdesk::models::device::{DeviceAction, DeviceRegistration, DeviceStatus};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
}

fn pending() -> DeviceRegistration {
    DeviceRegistration::new_pending("1", "s1", "a1:b2:c3", t0())
}

fn assert_invalid_state<T: std::fmt::Debug>(r: Result<T, AppError>) {
    match r {
        Err(AppError::InvalidState { entity, .. }) => assert_eq!(entity, "device"),
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test]
fn test_approve_then_revoke() {
    let t1 = t0() + Duration::hours(1);
    let t2 = t0() + Duration::days(3);

    let trusted = DeviceTrustWorkflow::approve(&pending(), t1).expect("approve pending");
    assert_eq!(trusted.status, DeviceStatus::Trusted);
    assert_eq!(trusted.status_changed_at, Some(t1));

    assert_invalid_state(DeviceTrustWorkflow::approve(&trusted, t2));

    let revoked = DeviceTrustWorkflow::revoke(&trusted, t2).expect("revoke trusted");
    assert_eq!(revoked.status, DeviceStatus::Revoked);

    assert_invalid_state(DeviceTrustWorkflow::revoke(&revoked, t2));

    let steps: Vec<_> = revoked.history.iter().map(|h| (h.from, h.to, h.at)).collect();
    assert_eq!(
        steps,
        vec![
            (DeviceStatus::Pending, DeviceStatus::Trusted, t1),
            (DeviceStatus::Trusted, DeviceStatus::Revoked, t2),
        ]
    );
}

#[test]
fn test_reject_pending_lands_in_revoked() {
    let rejected = DeviceTrustWorkflow::reject(&pending(), t0()).expect("reject pending");
    assert_eq!(rejected.status, DeviceStatus::Revoked);
    assert_eq!(rejected.history.len(), 1);
}

#[test]
fn test_pending_cannot_be_revoked() {
    assert_invalid_state(DeviceTrustWorkflow::revoke(&pending(), t0()));
}

#[test]
fn test_trusted_cannot_be_rejected() {
    let trusted = DeviceTrustWorkflow::approve(&pending(), t0()).expect("approve");
    assert_invalid_state(DeviceTrustWorkflow::reject(&trusted, t0()));
}

#[test]
fn test_revoked_is_terminal_for_every_action() {
    let revoked = DeviceTrustWorkflow::reject(&pending(), t0()).expect("reject");

    for action in [DeviceAction::Approve, DeviceAction::Reject, DeviceAction::Revoke] {
        assert!(DeviceTrustWorkflow::target_status(DeviceStatus::Revoked, action).is_none());
        assert_invalid_state(DeviceTrustWorkflow::transition(&revoked, action, t0()));
    }
}

#[test]
fn test_refused_transition_leaves_device_untouched() {
    let device = pending();
    let _ = DeviceTrustWorkflow::revoke(&device, t0());
    assert_eq!(device.status, DeviceStatus::Pending);
    assert!(device.history.is_empty());
}
