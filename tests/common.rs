#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, NaiveDate};
use clockdesk::models::clock_event::{ClockEvent, ClockEventKind};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn cdk() -> Command {
    cargo_bin_cmd!("clockdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_clockdesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Init the DB and register two host companies with one staff member each.
///
/// - `acme` (07:30 - 16:30) registered `s1`
/// - `globex` registered `s2`, who has individual hours 08:00 - 17:00
pub fn init_db_with_staff(db_path: &str) {
    cdk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    cdk()
        .args([
            "--db",
            db_path,
            "org",
            "add",
            "acme",
            "Acme Ltd",
            "--clock-in",
            "7:30 AM",
            "--clock-out",
            "4:30 PM",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", db_path, "org", "add", "globex", "Globex"])
        .assert()
        .success();

    cdk()
        .args(["--db", db_path, "staff", "add", "s1", "Thandi", "--org", "acme"])
        .assert()
        .success();

    cdk()
        .args([
            "--db",
            db_path,
            "staff",
            "add",
            "s2",
            "Pieter",
            "--org",
            "globex",
            "--clock-in",
            "08:00",
            "--clock-out",
            "17:00",
        ])
        .assert()
        .success();
}

pub fn clock(db_path: &str, subject: &str, timestamp: &str, kind: &str) {
    cdk()
        .args(["--db", db_path, "clock", subject, timestamp, kind])
        .assert()
        .success();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid test timestamp")
}

/// Event at `hh:mm` on `day`, UTC+02:00.
pub fn ev(subject: &str, day: &str, hhmm: &str, kind: ClockEventKind) -> ClockEvent {
    ClockEvent::new(subject, ts(&format!("{day}T{hhmm}:00+02:00")), kind, 100)
        .expect("valid test event")
}
