use crate::cli::commands::org::working_hours;
use crate::cli::commands::review::{
    access_cell, decide, parse_request_status, report_decision, status_cell,
};
use crate::cli::parser::CorrectionCmd;
use crate::config::Config;
use crate::core::workflow::approval::Decision;
use crate::core::workflow::policy::ReviewAuthorizationPolicy;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::load_subject;
use crate::db::requests::{insert_correction, list_requests};
use crate::errors::{AppError, AppResult};
use crate::models::request::{CorrectionDetails, CorrectionType};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::table::Table;
use chrono::Utc;

pub fn handle(cmd: &CorrectionCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        CorrectionCmd::Submit {
            subject,
            date,
            correction_type,
            description,
            clock_in,
            clock_out,
            break_start,
            break_end,
        } => {
            let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let requested = working_hours(clock_in, clock_out, break_start, break_end)?;

            let mut details =
                CorrectionDetails::new(day, CorrectionType::parse(correction_type), description)?;
            details.requested_clock_in = requested.clock_in_time;
            details.requested_clock_out = requested.clock_out_time;
            details.requested_break_start = requested.break_start_time;
            details.requested_break_end = requested.break_end_time;

            let row = load_subject(&pool.conn, subject)?;
            let request = insert_correction(
                &pool.conn,
                subject,
                row.org_id.as_deref(),
                &details,
                Utc::now(),
            )?;

            write_log(
                &pool.conn,
                "submit",
                &format!("attendance correction {}", request.id),
                &format!("{} for {subject} on {day}", details.correction_type.label()),
            )?;
            success(format!("Attendance correction {} submitted.", request.id));
        }

        CorrectionCmd::List { status } => {
            let status = parse_request_status(status.as_deref())?;
            let requests = list_requests::<CorrectionDetails>(&pool.conn, status)?;

            if requests.is_empty() {
                info("No attendance corrections found.");
                return Ok(());
            }

            let mut table = Table::new(
                &["ID", "Staff", "Date", "Type", "Requested", "Status", "Access", "Note"],
                &cfg.separator_char,
            );
            for r in &requests {
                let d = &r.details;
                let requested = format!(
                    "{} - {}",
                    d.requested_clock_in.as_deref().unwrap_or("--:--"),
                    d.requested_clock_out.as_deref().unwrap_or("--:--")
                );
                table.add_row(vec![
                    r.id.clone(),
                    r.subject_id.clone(),
                    d.date.to_string(),
                    d.correction_type.label(),
                    requested,
                    status_cell(r.status),
                    access_cell(ReviewAuthorizationPolicy::review_access(&cfg.reviewer, r)),
                    r.rejection_reason
                        .clone()
                        .unwrap_or_else(|| d.description.clone()),
                ]);
            }
            print!("{}", table.render());
        }

        CorrectionCmd::Approve { id } => {
            let done =
                decide::<CorrectionDetails>(&pool, &cfg.reviewer, id, Decision::Approve, None)?;
            report_decision(&pool, &cfg.reviewer, &done)?;
        }

        CorrectionCmd::Reject { id, reason } => {
            let done = decide::<CorrectionDetails>(
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
