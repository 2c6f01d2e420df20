//! Shared plumbing for the review commands: load, transition through the
//! pure workflow, persist, then re-read.

use crate::core::workflow::approval::{ApprovalWorkflow, Decision, PendingCounts};
use crate::core::workflow::policy::ReviewAccess;
use crate::db::devices::list_devices;
use crate::db::log::PendingAudit;
use crate::db::pool::DbPool;
use crate::db::requests::{StoredRequest, list_requests, load_request, save_decision};
use crate::errors::{AppError, AppResult};
use crate::models::device::DeviceStatus;
use crate::models::request::{
    ApprovableRequest, CorrectionDetails, LeaveDetails, RequestStatus,
};
use crate::models::reviewer::ReviewerContext;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, color_for_request_status, paint};
use chrono::Utc;

pub(crate) fn decide<T: StoredRequest + Clone>(
    pool: &DbPool,
    reviewer: &ReviewerContext,
    id: &str,
    decision: Decision,
    reason: Option<&str>,
) -> AppResult<ApprovableRequest<T>> {
    let request = load_request::<T>(&pool.conn, id)?;
    let decided =
        ApprovalWorkflow::submit_decision(&request, decision, reviewer, reason, Utc::now())?;

    let message = match &decided.rejection_reason {
        Some(r) => format!("{} by {}: {r}", decided.status, reviewer.id),
        None => format!("{} by {}", decided.status, reviewer.id),
    };
    let audit = PendingAudit::new(decision.as_str(), format!("{} {id}", T::ENTITY), message);
    save_decision(&pool.conn, &decided, &audit)?;

    load_request::<T>(&pool.conn, id)
}

/// Fresh pending counts for `reviewer`, read back from the store.
pub(crate) fn pending_counts(pool: &DbPool, reviewer: &ReviewerContext) -> AppResult<PendingCounts> {
    let pending = Some(RequestStatus::Pending);
    let leave = list_requests::<LeaveDetails>(&pool.conn, pending)?;
    let corrections = list_requests::<CorrectionDetails>(&pool.conn, pending)?;
    let devices = list_devices(&pool.conn, Some(DeviceStatus::Pending))?;

    Ok(PendingCounts::compute(reviewer, &leave, &corrections, &devices))
}

pub(crate) fn report_decision<T: StoredRequest>(
    pool: &DbPool,
    reviewer: &ReviewerContext,
    request: &ApprovableRequest<T>,
) -> AppResult<()> {
    success(format!("{} {} is now {}.", T::ENTITY, request.id, request.status));
    report_pending(pool, reviewer)
}

pub(crate) fn report_pending(pool: &DbPool, reviewer: &ReviewerContext) -> AppResult<()> {
    let counts = pending_counts(pool, reviewer)?;
    info(format!(
        "{} pending item(s) left for {}: {} leave, {} correction(s), {} device(s)",
        counts.total(),
        reviewer.id,
        counts.leave_applications,
        counts.attendance_corrections,
        counts.devices
    ));
    Ok(())
}

pub(crate) fn parse_request_status(raw: Option<&str>) -> AppResult<Option<RequestStatus>> {
    raw.map(|s| {
        RequestStatus::from_db_str(&s.trim().to_lowercase())
            .ok_or_else(|| AppError::Validation(format!("unknown request status '{s}'")))
    })
    .transpose()
}

pub(crate) fn status_cell(status: RequestStatus) -> String {
    paint(color_for_request_status(status), status.to_db_str())
}

pub(crate) fn access_cell(access: ReviewAccess) -> String {
    match access {
        ReviewAccess::Actionable => paint(GREEN, "actionable"),
        ReviewAccess::ViewOnly => paint(GREY, "view only"),
    }
}
