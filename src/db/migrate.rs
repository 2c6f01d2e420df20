use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension};
use tracing::info;

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_core_schema",
        description: "Created organizations, subjects and clock_events",
        sql: r#"
        CREATE TABLE IF NOT EXISTS organizations (
            id                  TEXT PRIMARY KEY,
            name                TEXT NOT NULL,
            default_clock_in    TEXT,
            default_clock_out   TEXT,
            default_break_start TEXT,
            default_break_end   TEXT
        );

        CREATE TABLE IF NOT EXISTS subjects (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            org_id      TEXT REFERENCES organizations(id),
            clock_in    TEXT,
            clock_out   TEXT,
            break_start TEXT,
            break_end   TEXT
        );

        CREATE TABLE IF NOT EXISTS clock_events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id  TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            kind        TEXT NOT NULL CHECK(kind IN ('in','out','break_start','break_end')),
            confidence  INTEGER NOT NULL DEFAULT 100 CHECK(confidence BETWEEN 0 AND 100),
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_clock_events_subject_ts
            ON clock_events(subject_id, timestamp);
        "#,
    },
    Migration {
        version: "20250301_0002_review_tables",
        description: "Created leave_applications and attendance_corrections",
        sql: r#"
        CREATE TABLE IF NOT EXISTS leave_applications (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id       TEXT NOT NULL,
            owning_org_id    TEXT,
            status           TEXT NOT NULL DEFAULT 'pending'
                             CHECK(status IN ('pending','approved','rejected')),
            rejection_reason TEXT,
            reviewed_by      TEXT,
            reviewed_at      TEXT,
            leave_type       TEXT NOT NULL,
            start_date       TEXT NOT NULL,
            end_date         TEXT NOT NULL,
            number_of_days   REAL NOT NULL,
            reason           TEXT NOT NULL,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attendance_corrections (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id            TEXT NOT NULL,
            owning_org_id         TEXT,
            status                TEXT NOT NULL DEFAULT 'pending'
                                  CHECK(status IN ('pending','approved','rejected')),
            rejection_reason      TEXT,
            reviewed_by           TEXT,
            reviewed_at           TEXT,
            date                  TEXT NOT NULL,
            correction_type       TEXT NOT NULL,
            requested_clock_in    TEXT,
            requested_clock_out   TEXT,
            requested_break_start TEXT,
            requested_break_end   TEXT,
            description           TEXT NOT NULL,
            created_at            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_leave_org_status
            ON leave_applications(owning_org_id, status);
        CREATE INDEX IF NOT EXISTS idx_corrections_org_status
            ON attendance_corrections(owning_org_id, status);
        "#,
    },
    Migration {
        version: "20250318_0003_devices",
        description: "Created devices and device_transitions",
        sql: r#"
        CREATE TABLE IF NOT EXISTS devices (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id        TEXT NOT NULL,
            fingerprint       TEXT NOT NULL,
            device_name       TEXT,
            owning_org_id     TEXT,
            status            TEXT NOT NULL DEFAULT 'pending'
                              CHECK(status IN ('pending','trusted','revoked')),
            registered_at     TEXT NOT NULL,
            status_changed_at TEXT
        );

        CREATE TABLE IF NOT EXISTS device_transitions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id   INTEGER NOT NULL REFERENCES devices(id),
            from_status TEXT NOT NULL,
            to_status   TEXT NOT NULL,
            at          TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_devices_fingerprint ON devices(fingerprint);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations. Idempotent.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql))?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )?;

        info!(version = m.version, "migration applied");
    }

    Ok(())
}
