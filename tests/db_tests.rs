mod common;
use common::{date, ev};

use chrono::Utc;
use clockdesk::core::workflow::approval::{ApprovalWorkflow, Decision};
use clockdesk::core::workflow::device::DeviceTrustWorkflow;
use clockdesk::db::devices::{insert_device, list_devices, load_device, save_transition};
use clockdesk::db::log::{PendingAudit, load_log};
use clockdesk::db::migrate::run_pending_migrations;
use clockdesk::db::models::{OrganizationRow, SubjectRow};
use clockdesk::db::pool::DbPool;
use clockdesk::db::queries::{
    insert_clock_event, load_events_for_subject, load_subject, resolve_schedule,
    upsert_organization, upsert_subject,
};
use clockdesk::db::requests::{
    insert_correction, insert_leave, list_requests, load_request, save_decision,
};
use clockdesk::errors::AppError;
use clockdesk::models::clock_event::ClockEventKind;
use clockdesk::models::date_range::DateRange;
use clockdesk::models::device::DeviceStatus;
use clockdesk::models::request::{
    CorrectionDetails, CorrectionType, LeaveDetails, LeaveType, RequestStatus,
};
use clockdesk::models::reviewer::ReviewerContext;
use clockdesk::models::schedule::{ScheduleSource, WorkingHours};

fn seeded() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");

    upsert_organization(
        &pool.conn,
        &OrganizationRow {
            id: "acme".into(),
            name: "Acme".into(),
            default_hours: WorkingHours::new("7:30 AM", "4:30 PM"),
        },
    )
    .expect("org");

    upsert_subject(
        &pool.conn,
        &SubjectRow {
            id: "s1".into(),
            name: "Thandi".into(),
            org_id: Some("acme".into()),
            hours: WorkingHours::default(),
        },
    )
    .expect("subject");

    pool
}

fn audit(operation: &str) -> PendingAudit {
    PendingAudit::new(operation, "test", format!("{operation} from db tests"))
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = DbPool::in_memory().expect("db");
    run_pending_migrations(&pool.conn).expect("second run");

    let applied = load_log(&pool.conn)
        .expect("log")
        .into_iter()
        .filter(|e| e.operation == "migration_applied")
        .count();
    assert_eq!(applied, 3);
}

#[test]
fn test_schedule_falls_back_to_host_company() {
    let pool = seeded();
    let subject = load_subject(&pool.conn, "s1").expect("subject");

    let sched = resolve_schedule(&pool.conn, &subject)
        .expect("resolve")
        .expect("host default");
    assert_eq!(sched.source, ScheduleSource::HostCompany);
    assert_eq!(sched.clock_in_time, "7:30 AM");

    assert!(matches!(
        load_subject(&pool.conn, "nobody"),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_events_are_filtered_by_local_date() {
    let pool = seeded();
    for e in [
        ev("s1", "2025-02-28", "08:00", ClockEventKind::ClockIn),
        ev("s1", "2025-03-03", "08:00", ClockEventKind::ClockIn),
        ev("s1", "2025-03-03", "17:00", ClockEventKind::ClockOut),
        ev("s2", "2025-03-03", "08:00", ClockEventKind::ClockIn),
    ] {
        insert_clock_event(&pool.conn, &e).expect("insert event");
    }

    let range = DateRange::parse("2025-03").expect("range");
    let events = load_events_for_subject(&pool.conn, "s1", &range).expect("load");
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.local_date() == date("2025-03-03")));
    assert_eq!(events[0].kind, ClockEventKind::ClockIn);
    assert_eq!(events[0].timestamp.offset().local_minus_utc(), 2 * 3600);
}

#[test]
fn test_leave_decision_round_trip() {
    let pool = seeded();
    let details = LeaveDetails::new(
        LeaveType::Annual,
        date("2025-04-01"),
        date("2025-04-04"),
        4.0,
        "family trip",
    )
    .expect("details");

    let created =
        insert_leave(&pool.conn, "s1", Some("acme"), &details, Utc::now()).expect("insert");
    let loaded = load_request::<LeaveDetails>(&pool.conn, &created.id).expect("load");
    assert_eq!(loaded.details, details);
    assert_eq!(loaded.owning_org_id.as_deref(), Some("acme"));

    let reviewer = ReviewerContext::host_company("hr@acme", "acme");
    let decided = ApprovalWorkflow::submit_decision(
        &loaded,
        Decision::Reject,
        &reviewer,
        Some("peak season"),
        Utc::now(),
    )
    .expect("decide");
    save_decision(&pool.conn, &decided, &audit("reject")).expect("save");

    let stored = load_request::<LeaveDetails>(&pool.conn, &created.id).expect("reload");
    assert_eq!(stored.status, RequestStatus::Rejected);
    assert_eq!(stored.rejection_reason.as_deref(), Some("peak season"));
    assert_eq!(stored.reviewed_by.as_deref(), Some("hr@acme"));
    assert!(stored.reviewed_at.is_some());

    let pending =
        list_requests::<LeaveDetails>(&pool.conn, Some(RequestStatus::Pending)).expect("list");
    assert!(pending.is_empty());
}

#[test]
fn test_second_writer_loses_the_race() {
    let pool = seeded();
    let details = CorrectionDetails::new(
        date("2025-03-03"),
        CorrectionType::MissingClockOut,
        "left early for clinic",
    )
    .expect("details");
    let created =
        insert_correction(&pool.conn, "s1", Some("acme"), &details, Utc::now()).expect("insert");

    // both reviewers read the pending request
    let seen_by_a = load_request::<CorrectionDetails>(&pool.conn, &created.id).expect("a");
    let seen_by_b = seen_by_a.clone();

    let admin = ReviewerContext::admin("root");
    let a = ApprovalWorkflow::submit_decision(&seen_by_a, Decision::Approve, &admin, None, Utc::now())
        .expect("a decides");
    let b = ApprovalWorkflow::submit_decision(
        &seen_by_b,
        Decision::Reject,
        &admin,
        Some("duplicate"),
        Utc::now(),
    )
    .expect("b decides locally");

    save_decision(&pool.conn, &a, &audit("approve")).expect("first write wins");
    let err = save_decision(&pool.conn, &b, &audit("reject")).unwrap_err();
    assert!(matches!(err, AppError::InvalidState { .. }), "{err}");

    let stored = load_request::<CorrectionDetails>(&pool.conn, &created.id).expect("reload");
    assert_eq!(stored.status, RequestStatus::Approved);
}

#[test]
fn test_device_transitions_persist_history() {
    let pool = seeded();
    let device = insert_device(
        &pool.conn,
        "s1",
        "a1:b2:c3",
        Some("front gate tablet"),
        Some("acme"),
        Utc::now(),
    )
    .expect("insert");

    let trusted = DeviceTrustWorkflow::approve(&device, Utc::now()).expect("approve");
    save_transition(&pool.conn, &device, &trusted, &audit("approve")).expect("save approve");

    let stored = load_device(&pool.conn, &device.id).expect("reload");
    assert_eq!(stored.status, DeviceStatus::Trusted);
    assert_eq!(stored.history.len(), 1);
    assert_eq!(stored.device_name.as_deref(), Some("front gate tablet"));

    // a stale copy can no longer be rejected in the store
    let stale = DeviceTrustWorkflow::reject(&device, Utc::now()).expect("local reject");
    assert!(matches!(
        save_transition(&pool.conn, &device, &stale, &audit("reject")),
        Err(AppError::InvalidState { .. })
    ));

    let revoked = DeviceTrustWorkflow::revoke(&stored, Utc::now()).expect("revoke");
    save_transition(&pool.conn, &stored, &revoked, &audit("revoke")).expect("save revoke");

    let stored = load_device(&pool.conn, &device.id).expect("reload");
    assert_eq!(stored.status, DeviceStatus::Revoked);
    assert_eq!(stored.history.len(), 2);
    assert!(
        list_devices(&pool.conn, Some(DeviceStatus::Pending))
            .expect("list")
            .is_empty()
    );
}

#[test]
fn test_failed_history_write_rolls_back_device_status() {
    let pool = seeded();
    let device = insert_device(&pool.conn, "s1", "d4:e5", None, Some("acme"), Utc::now())
        .expect("insert");
    let log_rows_before = load_log(&pool.conn).expect("log").len();

    pool.conn
        .execute_batch("DROP TABLE device_transitions")
        .expect("drop history table");

    let trusted = DeviceTrustWorkflow::approve(&device, Utc::now()).expect("approve");
    let res = save_transition(&pool.conn, &device, &trusted, &audit("approve"));
    assert!(matches!(res, Err(AppError::Db(_))), "{res:?}");

    let stored = list_devices(&pool.conn, None).expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, DeviceStatus::Pending);
    assert!(stored[0].status_changed_at.is_none());
    assert_eq!(load_log(&pool.conn).expect("log").len(), log_rows_before);
}

#[test]
fn test_failed_audit_write_rolls_back_decision() {
    let pool = seeded();
    let details = LeaveDetails::new(
        LeaveType::Sick,
        date("2025-05-05"),
        date("2025-05-05"),
        1.0,
        "flu",
    )
    .expect("details");
    let created =
        insert_leave(&pool.conn, "s1", Some("acme"), &details, Utc::now()).expect("insert");

    pool.conn
        .execute_batch("DROP TABLE log")
        .expect("drop log table");

    let admin = ReviewerContext::admin("root");
    let decided =
        ApprovalWorkflow::submit_decision(&created, Decision::Approve, &admin, None, Utc::now())
            .expect("decide");
    let res = save_decision(&pool.conn, &decided, &audit("approve"));
    assert!(matches!(res, Err(AppError::Db(_))), "{res:?}");

    let stored = load_request::<LeaveDetails>(&pool.conn, &created.id).expect("reload");
    assert_eq!(stored.status, RequestStatus::Pending);
    assert!(stored.reviewed_by.is_none());
}

#[test]
fn test_saved_transition_writes_audit_line() {
    let pool = seeded();
    let device = insert_device(&pool.conn, "s1", "f6:07", None, Some("acme"), Utc::now())
        .expect("insert");

    let trusted = DeviceTrustWorkflow::approve(&device, Utc::now()).expect("approve");
    save_transition(
        &pool.conn,
        &device,
        &trusted,
        &PendingAudit::new("approve", format!("device {}", device.id), "pending → trusted"),
    )
    .expect("save");

    let log = load_log(&pool.conn).expect("log");
    let last = log.last().expect("audit line");
    assert_eq!(last.operation, "approve");
    assert_eq!(last.target, format!("device {}", device.id));
}
