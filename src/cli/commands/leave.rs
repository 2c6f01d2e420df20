use crate::cli::commands::review::{
    access_cell, decide, parse_request_status, report_decision, status_cell,
};
use crate::cli::parser::LeaveCmd;
use crate::config::Config;
use crate::core::workflow::approval::Decision;
use crate::core::workflow::policy::ReviewAuthorizationPolicy;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::load_subject;
use crate::db::requests::{insert_leave, list_requests};
use crate::errors::{AppError, AppResult};
use crate::models::request::{LeaveDetails, LeaveType};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::table::Table;
use chrono::Utc;

pub fn handle(cmd: &LeaveCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        LeaveCmd::Submit {
            subject,
            leave_type,
            start,
            end,
            days,
            reason,
        } => {
            let start_date =
                parse_date(start).ok_or_else(|| AppError::InvalidDate(start.clone()))?;
            let end_date = parse_date(end).ok_or_else(|| AppError::InvalidDate(end.clone()))?;
            let days = days.unwrap_or(((end_date - start_date).num_days() + 1) as f64);

            let details = LeaveDetails::new(
                LeaveType::parse(leave_type),
                start_date,
                end_date,
                days,
                reason,
            )?;

            let row = load_subject(&pool.conn, subject)?;
            let request = insert_leave(
                &pool.conn,
                subject,
                row.org_id.as_deref(),
                &details,
                Utc::now(),
            )?;

            write_log(
                &pool.conn,
                "submit",
                &format!("leave application {}", request.id),
                &format!(
                    "{} leave for {subject}: {start_date} → {end_date}",
                    details.leave_type.label()
                ),
            )?;
            success(format!("Leave application {} submitted.", request.id));
        }

        LeaveCmd::List { status } => {
            let status = parse_request_status(status.as_deref())?;
            let requests = list_requests::<LeaveDetails>(&pool.conn, status)?;

            if requests.is_empty() {
                info("No leave applications found.");
                return Ok(());
            }

            let mut table = Table::new(
                &["ID", "Staff", "Type", "From", "To", "Days", "Status", "Access", "Reason"],
                &cfg.separator_char,
            );
            for r in &requests {
                let access = ReviewAuthorizationPolicy::review_access(&cfg.reviewer, r);
                table.add_row(vec![
                    r.id.clone(),
                    r.subject_id.clone(),
                    r.details.leave_type.label().to_string(),
                    r.details.start_date.to_string(),
                    r.details.end_date.to_string(),
                    r.details.number_of_days.to_string(),
                    status_cell(r.status),
                    access_cell(access),
                    r.rejection_reason
                        .clone()
                        .unwrap_or_else(|| r.details.reason.clone()),
                ]);
            }
            print!("{}", table.render());
        }

        LeaveCmd::Approve { id } => {
            let done = decide::<LeaveDetails>(&pool, &cfg.reviewer, id, Decision::Approve, None)?;
            report_decision(&pool, &cfg.reviewer, &done)?;
        }

        LeaveCmd::Reject { id, reason } => {
            let done = decide::<LeaveDetails>(
                &pool,
                &cfg.reviewer,
                id,
                Decision::Reject,
                reason.as_deref(),
            )?;
            report_decision(&pool, &cfg.reviewer, &done)?;
        }
    }

    Ok(())
}
