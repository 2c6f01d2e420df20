use crate::core::logic::Core;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries::{load_events_for_subject, load_subject, resolve_schedule};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{DayExport, ExportFormat};
use crate::models::date_range::DateRange;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

pub struct ExportLogic;

impl ExportLogic {
    /// Export a subject's reconciled timesheet over `range`.
    ///
    /// `file` must be absolute once `~` is expanded.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        subject_id: &str,
        range: DateRange,
        force: bool,
    ) -> AppResult<()> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(&path, force)?;

        let subject = load_subject(&pool.conn, subject_id)?;
        let schedule = resolve_schedule(&pool.conn, &subject)?;
        let events = load_events_for_subject(&pool.conn, subject_id, &range)?;

        let summary = Core::build_period_summary(subject_id, &events, range, schedule);

        if summary.days.is_empty() {
            warning("No attendance found for the selected range.");
            return Ok(());
        }

        let rows: Vec<DayExport> = summary
            .days
            .iter()
            .map(|d| DayExport::from_day(subject_id, d))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&summary, &rows, &path)?,
        }

        write_log(
            &pool.conn,
            "export",
            subject_id,
            &format!(
                "{} export of {} day(s) to {}",
                format.as_str(),
                rows.len(),
                path.display()
            ),
        )?;

        Ok(())
    }
}
