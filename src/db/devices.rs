use crate::db::log::PendingAudit;
use crate::db::queries::{parse_opt_utc, parse_row_id, parse_utc};
use crate::errors::{AppError, AppResult};
use crate::models::device::{DeviceRegistration, DeviceStatus, DeviceTransition};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn parse_status(idx: usize, raw: &str) -> rusqlite::Result<DeviceStatus> {
    DeviceStatus::from_db_str(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::Parse(format!("Invalid device status: {raw}"))),
        )
    })
}

fn map_device(row: &Row) -> rusqlite::Result<DeviceRegistration> {
    let status: String = row.get("status")?;
    let registered_at: String = row.get("registered_at")?;

    Ok(DeviceRegistration {
        id: row.get::<_, i64>("id")?.to_string(),
        subject_id: row.get("subject_id")?,
        fingerprint: row.get("fingerprint")?,
        status: parse_status(0, &status)?,
        registered_at: parse_utc(0, &registered_at)?,
        device_name: row.get("device_name")?,
        owning_org_id: row.get("owning_org_id")?,
        status_changed_at: parse_opt_utc(0, row.get("status_changed_at")?)?,
        history: Vec::new(),
    })
}

fn load_history(conn: &Connection, device_id: i64) -> AppResult<Vec<DeviceTransition>> {
    let mut stmt = conn.prepare_cached(
        "SELECT from_status, to_status, at FROM device_transitions
         WHERE device_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([device_id], |row| {
        let from: String = row.get(0)?;
        let to: String = row.get(1)?;
        let at: String = row.get(2)?;
        Ok(DeviceTransition {
            from: parse_status(0, &from)?,
            to: parse_status(1, &to)?,
            at: parse_utc(2, &at)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_device(
    conn: &Connection,
    subject_id: &str,
    fingerprint: &str,
    device_name: Option<&str>,
    owning_org_id: Option<&str>,
    registered_at: DateTime<Utc>,
) -> AppResult<DeviceRegistration> {
    conn.execute(
        "INSERT INTO devices
             (subject_id, fingerprint, device_name, owning_org_id, status, registered_at)
         VALUES (?1, ?2, ?3, ?4, 'pending', ?5)",
        params![
            subject_id,
            fingerprint,
            device_name,
            owning_org_id,
            registered_at.to_rfc3339(),
        ],
    )?;

    let mut device = DeviceRegistration::new_pending(
        conn.last_insert_rowid().to_string(),
        subject_id,
        fingerprint,
        registered_at,
    );
    device.device_name = device_name.map(str::to_string);
    device.owning_org_id = owning_org_id.map(str::to_string);
    Ok(device)
}

pub fn load_device(conn: &Connection, id: &str) -> AppResult<DeviceRegistration> {
    let row_id = parse_row_id(id)?;

    let mut device = conn
        .query_row("SELECT * FROM devices WHERE id = ?1", [row_id], map_device)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("device {id}")))?;

    device.history = load_history(conn, row_id)?;
    Ok(device)
}

pub fn list_devices(
    conn: &Connection,
    status: Option<DeviceStatus>,
) -> AppResult<Vec<DeviceRegistration>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM devices
         WHERE ?1 IS NULL OR status = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([status.map(|s| s.to_db_str())], map_device)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Persist the newest transition of `after` together with its history row
/// and audit line, in one transaction. The stored status must still equal
/// `before.status`, otherwise nothing is written.
pub fn save_transition(
    conn: &Connection,
    before: &DeviceRegistration,
    after: &DeviceRegistration,
    audit: &PendingAudit,
) -> AppResult<()> {
    let row_id = parse_row_id(&after.id)?;
    let Some(last) = after.history.last() else {
        return Err(AppError::Validation(format!(
            "device {} has no transition to save",
            after.id
        )));
    };

    let tx = conn.unchecked_transaction()?;

    let changed = tx.execute(
        "UPDATE devices SET status = ?1, status_changed_at = ?2
         WHERE id = ?3 AND status = ?4",
        params![
            after.status.to_db_str(),
            after.status_changed_at.map(|t| t.to_rfc3339()),
            row_id,
            before.status.to_db_str(),
        ],
    )?;

    if changed == 0 {
        let current = load_device(&tx, &after.id)?;
        return Err(AppError::InvalidState {
            entity: "device",
            id: after.id.clone(),
            state: current.status.to_string(),
            action: "save transition for".to_string(),
        });
    }

    tx.execute(
        "INSERT INTO device_transitions (device_id, from_status, to_status, at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            row_id,
            last.from.to_db_str(),
            last.to.to_db_str(),
            last.at.to_rfc3339(),
        ],
    )?;
    audit.write(&tx)?;

    tx.commit()?;
    Ok(())
}
