//! Persistence of leave applications and attendance corrections.
//!
//! Both tables share the review columns; only the payload columns differ,
//! which `StoredRequest` describes per kind.

use crate::db::log::PendingAudit;
use crate::db::queries::{parse_opt_utc, parse_row_id};
use crate::errors::{AppError, AppResult};
use crate::models::request::{
    ApprovableRequest, CorrectionDetails, CorrectionType, LeaveDetails, LeaveType, RequestKind,
    RequestStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub trait StoredRequest: RequestKind + Sized {
    const TABLE: &'static str;

    fn map_details(row: &Row) -> rusqlite::Result<Self>;
}

impl StoredRequest for LeaveDetails {
    const TABLE: &'static str = "leave_applications";

    fn map_details(row: &Row) -> rusqlite::Result<Self> {
        let leave_type: String = row.get("leave_type")?;
        Ok(LeaveDetails {
            leave_type: LeaveType::parse(&leave_type),
            start_date: parse_date(row, "start_date")?,
            end_date: parse_date(row, "end_date")?,
            number_of_days: row.get("number_of_days")?,
            reason: row.get("reason")?,
        })
    }
}

impl StoredRequest for CorrectionDetails {
    const TABLE: &'static str = "attendance_corrections";

    fn map_details(row: &Row) -> rusqlite::Result<Self> {
        let correction_type: String = row.get("correction_type")?;
        Ok(CorrectionDetails {
            date: parse_date(row, "date")?,
            correction_type: CorrectionType::parse(&correction_type),
            requested_clock_in: row.get("requested_clock_in")?,
            requested_clock_out: row.get("requested_clock_out")?,
            requested_break_start: row.get("requested_break_start")?,
            requested_break_end: row.get("requested_break_end")?,
            description: row.get("description")?,
        })
    }
}

fn parse_date(row: &Row, column: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(column)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(raw.clone())),
        )
    })
}

fn map_request<T: StoredRequest>(row: &Row) -> rusqlite::Result<ApprovableRequest<T>> {
    let status_str: String = row.get("status")?;
    let status = RequestStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Parse(format!("Invalid status: {status_str}"))),
        )
    })?;

    Ok(ApprovableRequest {
        id: row.get::<_, i64>("id")?.to_string(),
        subject_id: row.get("subject_id")?,
        owning_org_id: row.get("owning_org_id")?,
        status,
        rejection_reason: row.get("rejection_reason")?,
        reviewed_by: row.get("reviewed_by")?,
        reviewed_at: parse_opt_utc(0, row.get("reviewed_at")?)?,
        details: T::map_details(row)?,
    })
}

pub fn load_request<T: StoredRequest>(
    conn: &Connection,
    id: &str,
) -> AppResult<ApprovableRequest<T>> {
    let row_id = parse_row_id(id)?;
    let sql = format!("SELECT * FROM {} WHERE id = ?1", T::TABLE);

    conn.query_row(&sql, [row_id], map_request::<T>)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("{} {id}", T::ENTITY)))
}

pub fn list_requests<T: StoredRequest>(
    conn: &Connection,
    status: Option<RequestStatus>,
) -> AppResult<Vec<ApprovableRequest<T>>> {
    let mut out = Vec::new();

    match status {
        Some(s) => {
            let sql = format!("SELECT * FROM {} WHERE status = ?1 ORDER BY id ASC", T::TABLE);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([s.to_db_str()], map_request::<T>)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let sql = format!("SELECT * FROM {} ORDER BY id ASC", T::TABLE);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], map_request::<T>)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Persist a decided request and its audit line in one transaction. The row
/// must still be pending in the store; if another reviewer got there first,
/// nothing is written.
pub fn save_decision<T: StoredRequest>(
    conn: &Connection,
    decided: &ApprovableRequest<T>,
    audit: &PendingAudit,
) -> AppResult<()> {
    let row_id = parse_row_id(&decided.id)?;
    let sql = format!(
        "UPDATE {} SET status = ?1, rejection_reason = ?2, reviewed_by = ?3, reviewed_at = ?4
         WHERE id = ?5 AND status = 'pending'",
        T::TABLE
    );

    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(
        &sql,
        params![
            decided.status.to_db_str(),
            decided.rejection_reason,
            decided.reviewed_by,
            decided.reviewed_at.map(|t| t.to_rfc3339()),
            row_id,
        ],
    )?;

    if changed == 0 {
        let current = load_request::<T>(&tx, &decided.id)?;
        return Err(AppError::InvalidState {
            entity: T::ENTITY,
            id: decided.id.clone(),
            state: current.status.to_string(),
            action: "save decision for".to_string(),
        });
    }

    audit.write(&tx)?;
    tx.commit()?;
    Ok(())
}

pub fn insert_leave(
    conn: &Connection,
    subject_id: &str,
    owning_org_id: Option<&str>,
    details: &LeaveDetails,
    created_at: DateTime<Utc>,
) -> AppResult<ApprovableRequest<LeaveDetails>> {
    conn.execute(
        "INSERT INTO leave_applications
             (subject_id, owning_org_id, status, leave_type, start_date, end_date,
              number_of_days, reason, created_at)
         VALUES (?1, ?2, 'pending', ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            subject_id,
            owning_org_id,
            details.leave_type.label(),
            details.start_date.format("%Y-%m-%d").to_string(),
            details.end_date.format("%Y-%m-%d").to_string(),
            details.number_of_days,
            details.reason,
            created_at.to_rfc3339(),
        ],
    )?;

    Ok(ApprovableRequest::new_pending(
        conn.last_insert_rowid().to_string(),
        subject_id,
        owning_org_id.map(str::to_string),
        details.clone(),
    ))
}

pub fn insert_correction(
    conn: &Connection,
    subject_id: &str,
    owning_org_id: Option<&str>,
    details: &CorrectionDetails,
    created_at: DateTime<Utc>,
) -> AppResult<ApprovableRequest<CorrectionDetails>> {
    conn.execute(
        "INSERT INTO attendance_corrections
             (subject_id, owning_org_id, status, date, correction_type,
              requested_clock_in, requested_clock_out, requested_break_start,
              requested_break_end, description, created_at)
         VALUES (?1, ?2, 'pending', ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            subject_id,
            owning_org_id,
            details.date.format("%Y-%m-%d").to_string(),
            details.correction_type.code(),
            details.requested_clock_in,
            details.requested_clock_out,
            details.requested_break_start,
            details.requested_break_end,
            details.description,
            created_at.to_rfc3339(),
        ],
    )?;

    Ok(ApprovableRequest::new_pending(
        conn.last_insert_rowid().to_string(),
        subject_id,
        owning_org_id.map(str::to_string),
        details.clone(),
    ))
}
