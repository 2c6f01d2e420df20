use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::time_parser::parse_timestamp;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_clock_event, load_subject};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::{ClockEvent, ClockEventKind};
use crate::ui::messages::success;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock {
        subject,
        timestamp,
        kind,
        confidence,
    } = cmd
    {
        let kind = ClockEventKind::from_code(kind).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown event kind '{kind}' (expected in, out, break-start or break-end)"
            ))
        })?;
        let at = parse_timestamp(timestamp, *Local::now().offset())?;

        let pool = DbPool::new(&cfg.database)?;
        load_subject(&pool.conn, subject)?;

        let event = ClockEvent::new(subject.as_str(), at, kind, *confidence)?;
        let id = insert_clock_event(&pool.conn, &event)?;

        write_log(
            &pool.conn,
            "clock",
            subject,
            &format!("{} at {} (event {id})", kind.label(), at.to_rfc3339()),
        )?;

        success(format!(
            "{} recorded for {subject} at {}",
            kind.label(),
            at.format("%Y-%m-%d %H:%M")
        ));
    }
    Ok(())
}
