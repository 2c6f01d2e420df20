use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::resolve_range;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        subject,
        range,
        force,
    } = cmd
    {
        let range = resolve_range(range.as_deref())?;
        let mut pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&mut pool, *format, file, subject, range, *force)?;
    }
    Ok(())
}
