use crate::db::models::{OrganizationRow, SubjectRow};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::{ClockEvent, ClockEventKind};
use crate::models::date_range::DateRange;
use crate::models::schedule::{ExpectedSchedule, WorkingHours};
use chrono::{DateTime, Local, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// Organizations & subjects
// ---------------------------------------------------------------------------

pub fn upsert_organization(conn: &Connection, org: &OrganizationRow) -> AppResult<()> {
    conn.execute(
        "INSERT INTO organizations
             (id, name, default_clock_in, default_clock_out, default_break_start, default_break_end)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             default_clock_in = excluded.default_clock_in,
             default_clock_out = excluded.default_clock_out,
             default_break_start = excluded.default_break_start,
             default_break_end = excluded.default_break_end",
        params![
            org.id,
            org.name,
            org.default_hours.clock_in_time,
            org.default_hours.clock_out_time,
            org.default_hours.break_start_time,
            org.default_hours.break_end_time,
        ],
    )?;
    Ok(())
}

pub fn load_organization(conn: &Connection, id: &str) -> AppResult<Option<OrganizationRow>> {
    let row = conn
        .query_row(
            "SELECT id, name, default_clock_in, default_clock_out,
                    default_break_start, default_break_end
             FROM organizations WHERE id = ?1",
            [id],
            |row| {
                Ok(OrganizationRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    default_hours: WorkingHours {
                        clock_in_time: row.get(2)?,
                        clock_out_time: row.get(3)?,
                        break_start_time: row.get(4)?,
                        break_end_time: row.get(5)?,
                    },
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn upsert_subject(conn: &Connection, subject: &SubjectRow) -> AppResult<()> {
    conn.execute(
        "INSERT INTO subjects (id, name, org_id, clock_in, clock_out, break_start, break_end)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             org_id = excluded.org_id,
             clock_in = excluded.clock_in,
             clock_out = excluded.clock_out,
             break_start = excluded.break_start,
             break_end = excluded.break_end",
        params![
            subject.id,
            subject.name,
            subject.org_id,
            subject.hours.clock_in_time,
            subject.hours.clock_out_time,
            subject.hours.break_start_time,
            subject.hours.break_end_time,
        ],
    )?;
    Ok(())
}

pub fn load_subject(conn: &Connection, id: &str) -> AppResult<SubjectRow> {
    conn.query_row(
        "SELECT id, name, org_id, clock_in, clock_out, break_start, break_end
         FROM subjects WHERE id = ?1",
        [id],
        |row| {
            Ok(SubjectRow {
                id: row.get(0)?,
                name: row.get(1)?,
                org_id: row.get(2)?,
                hours: WorkingHours {
                    clock_in_time: row.get(3)?,
                    clock_out_time: row.get(4)?,
                    break_start_time: row.get(5)?,
                    break_end_time: row.get(6)?,
                },
            })
        },
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("subject {id}")))
}

pub fn list_subjects(conn: &Connection) -> AppResult<Vec<SubjectRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, org_id, clock_in, clock_out, break_start, break_end
         FROM subjects ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(SubjectRow {
            id: row.get(0)?,
            name: row.get(1)?,
            org_id: row.get(2)?,
            hours: WorkingHours {
                clock_in_time: row.get(3)?,
                clock_out_time: row.get(4)?,
                break_start_time: row.get(5)?,
                break_end_time: row.get(6)?,
            },
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Individual hours, else the host company's defaults, else nothing.
pub fn resolve_schedule(
    conn: &Connection,
    subject: &SubjectRow,
) -> AppResult<Option<ExpectedSchedule>> {
    let org_hours = match &subject.org_id {
        Some(org_id) => load_organization(conn, org_id)?.map(|o| o.default_hours),
        None => None,
    };

    Ok(ExpectedSchedule::resolve(Some(&subject.hours), org_hours.as_ref()))
}

// ---------------------------------------------------------------------------
// Clock events
// ---------------------------------------------------------------------------

pub fn insert_clock_event(conn: &Connection, ev: &ClockEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO clock_events (subject_id, timestamp, kind, confidence, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.subject_id,
            ev.timestamp.to_rfc3339(),
            ev.kind.to_db_str(),
            ev.confidence,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Events whose local date falls in `range`. The first ten characters of an
/// RFC 3339 timestamp are its local date, so the filter runs in SQL.
pub fn load_events_for_subject(
    conn: &Connection,
    subject_id: &str,
    range: &DateRange,
) -> AppResult<Vec<ClockEvent>> {
    let mut stmt = conn.prepare(
        "SELECT subject_id, timestamp, kind, confidence FROM clock_events
         WHERE subject_id = ?1
           AND substr(timestamp, 1, 10) BETWEEN ?2 AND ?3
         ORDER BY timestamp ASC",
    )?;

    let rows = stmt.query_map(
        params![
            subject_id,
            range.start.format("%Y-%m-%d").to_string(),
            range.end.format("%Y-%m-%d").to_string(),
        ],
        map_event_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_event_row(row: &Row) -> Result<ClockEvent> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(ts_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = ClockEventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(AppError::Parse(format!("Invalid event kind: {kind_str}"))),
        )
    })?;

    Ok(ClockEvent {
        subject_id: row.get("subject_id")?,
        timestamp,
        kind,
        confidence: row.get("confidence")?,
    })
}

// ---------------------------------------------------------------------------
// Shared row helpers
// ---------------------------------------------------------------------------

pub(crate) fn parse_utc(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTime(raw.to_string())),
            )
        })
}

pub(crate) fn parse_opt_utc(idx: usize, raw: Option<String>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|s| parse_utc(idx, &s)).transpose()
}

pub(crate) fn parse_row_id(id: &str) -> AppResult<i64> {
    id.trim()
        .parse()
        .map_err(|_| AppError::NotFound(format!("invalid id '{id}'")))
}
