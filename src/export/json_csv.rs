use crate::errors::{AppError, AppResult};
use crate::export::{DayExport, notify_export_success};
use crate::models::period_summary::PeriodSummary;
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct JsonTimesheet<'a> {
    summary: &'a PeriodSummary,
    rows: &'a [DayExport],
}

/// JSON carries the full period summary next to the flat rows.
pub(crate) fn export_json(
    summary: &PeriodSummary,
    rows: &[DayExport],
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(&JsonTimesheet { summary, rows })
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV header comes from serde field names.
pub(crate) fn export_csv(rows: &[DayExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
