use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{cdk, clock, init_db_with_staff, setup_test_db, temp_out};

fn scenario_a(db_path: &str) {
    clock(db_path, "s1", "2025-03-03T07:50:00+02:00", "in");
    clock(db_path, "s1", "2025-03-03T07:52:00+02:00", "in");
    clock(db_path, "s1", "2025-03-03T12:00:00+02:00", "break-start");
    clock(db_path, "s1", "2025-03-03T12:30:00+02:00", "break-end");
    clock(db_path, "s1", "2025-03-03T16:45:00+02:00", "out");
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    cdk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_timesheet_reconciles_noisy_events() {
    let db_path = setup_test_db("cli_timesheet");
    init_db_with_staff(&db_path);
    scenario_a(&db_path);

    cdk()
        .args(["--db", &db_path, "timesheet", "s1", "--range", "2025-03-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-03"))
        .stdout(contains("7:50 AM"))
        .stdout(contains("4:45 PM"))
        .stdout(contains("8.42"))
        .stdout(contains("Late"))
        .stdout(contains("host company default"));
}

#[test]
fn test_timesheet_without_events_warns() {
    let db_path = setup_test_db("cli_timesheet_empty");
    init_db_with_staff(&db_path);

    cdk()
        .args(["--db", &db_path, "timesheet", "s2", "--range", "2025-03"])
        .assert()
        .success()
        .stdout(contains("No clock events"));
}

#[test]
fn test_clock_rejects_bad_input() {
    let db_path = setup_test_db("cli_clock_bad");
    init_db_with_staff(&db_path);

    cdk()
        .args(["--db", &db_path, "clock", "s1", "2025-03-03T07:50:00+02:00", "lunch"])
        .assert()
        .failure()
        .stderr(contains("unknown event kind"));

    cdk()
        .args(["--db", &db_path, "clock", "s1", "not a time", "in"])
        .assert()
        .failure()
        .stderr(contains("Parse error"));

    cdk()
        .args(["--db", &db_path, "clock", "ghost", "2025-03-03 08:00", "in"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_leave_review_is_scoped_to_the_owning_org() {
    let db_path = setup_test_db("cli_leave_review");
    init_db_with_staff(&db_path);

    cdk()
        .args([
            "--db",
            &db_path,
            "leave",
            "submit",
            "s1",
            "--type",
            "sick",
            "--start",
            "2025-03-10",
            "--end",
            "2025-03-11",
            "--reason",
            "flu",
        ])
        .assert()
        .success()
        .stdout(contains("Leave application 1 submitted"));

    cdk()
        .args(["--db", &db_path, "--as-org", "globex", "leave", "list"])
        .assert()
        .success()
        .stdout(contains("view only"));

    cdk()
        .args(["--db", &db_path, "--as-org", "globex", "leave", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("Unauthorized"));

    cdk()
        .args(["--db", &db_path, "--as-org", "acme", "leave", "reject", "1"])
        .assert()
        .failure()
        .stderr(contains("rejection reason is required"));

    cdk()
        .args([
            "--db", &db_path, "--as-org", "acme", "leave", "reject", "1", "--reason",
            "no cover",
        ])
        .assert()
        .success()
        .stdout(contains("is now rejected"))
        .stdout(contains("0 pending item(s)"));

    cdk()
        .args(["--db", &db_path, "leave", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid state"));

    cdk()
        .args(["--db", &db_path, "leave", "list", "--status", "rejected"])
        .assert()
        .success()
        .stdout(contains("no cover"));
}

#[test]
fn test_correction_submit_and_approve() {
    let db_path = setup_test_db("cli_correction");
    init_db_with_staff(&db_path);

    cdk()
        .args([
            "--db",
            &db_path,
            "correction",
            "submit",
            "s2",
            "--date",
            "2025-03-03",
            "--type",
            "missing_clock_out",
            "--description",
            "forgot to clock out",
            "--clock-out",
            "5:00 PM",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "correction", "list"])
        .assert()
        .success()
        .stdout(contains("Missing Clock-Out"))
        .stdout(contains("5:00 PM"));

    cdk()
        .args(["--db", &db_path, "pending"])
        .assert()
        .success()
        .stdout(contains("Attendance corrections : 1"));

    cdk()
        .args(["--db", &db_path, "--as-org", "globex", "correction", "approve", "1"])
        .assert()
        .success()
        .stdout(contains("is now approved"));
}

#[test]
fn test_device_trust_lifecycle() {
    let db_path = setup_test_db("cli_device");
    init_db_with_staff(&db_path);

    cdk()
        .args([
            "--db",
            &db_path,
            "device",
            "register",
            "s1",
            "a1:b2:c3",
            "--name",
            "gate tablet",
        ])
        .assert()
        .success()
        .stdout(contains("awaiting approval"));

    cdk()
        .args(["--db", &db_path, "device", "revoke", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid state"));

    cdk()
        .args(["--db", &db_path, "--as-org", "globex", "device", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("Unauthorized"));

    cdk()
        .args(["--db", &db_path, "device", "approve", "1"])
        .assert()
        .success()
        .stdout(contains("is now trusted"));

    cdk()
        .args(["--db", &db_path, "device", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid state"));

    cdk()
        .args(["--db", &db_path, "device", "revoke", "1"])
        .assert()
        .success()
        .stdout(contains("is now revoked"));

    cdk()
        .args(["--db", &db_path, "device", "list", "--status", "revoked"])
        .assert()
        .success()
        .stdout(contains("a1:b2:c3"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    init_db_with_staff(&db_path);
    scenario_a(&db_path);

    let csv_out = temp_out("cli_export", "csv");
    cdk()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_out, "s1", "--range",
            "2025-03",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&csv_out).expect("read exported csv");
    assert!(content.starts_with("subject_id,date,clock_in"));
    assert!(content.contains("s1,2025-03-03,7:50 AM"));
    assert!(content.contains("8.42"));

    let json_out = temp_out("cli_export", "json");
    cdk()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &json_out, "s1", "--range",
            "2025-03",
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read json")).expect("parse");
    assert_eq!(json["rows"][0]["date"], "2025-03-03");
    assert_eq!(json["summary"]["stats"]["complete_days"], 1);
    assert_eq!(json["rows"][0]["lateness"], "Late");
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("cli_export_relative");
    init_db_with_staff(&db_path);

    cdk()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", "out.csv", "s1",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_staff(&db_path);
    clock(&db_path, "s1", "2025-03-03T07:50:00+02:00", "in");

    cdk()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("clock")))
        .stdout(contains("Database initialized"));
}
