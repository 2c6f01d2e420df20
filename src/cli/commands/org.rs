use crate::cli::parser::OrgCmd;
use crate::config::Config;
use crate::core::time_parser::parse_minute_of_day;
use crate::db::log::write_log;
use crate::db::models::OrganizationRow;
use crate::db::pool::DbPool;
use crate::db::queries::upsert_organization;
use crate::errors::AppResult;
use crate::models::schedule::WorkingHours;
use crate::ui::messages::success;

/// Build working hours from CLI options; every given time must parse.
pub(crate) fn working_hours(
    clock_in: &Option<String>,
    clock_out: &Option<String>,
    break_start: &Option<String>,
    break_end: &Option<String>,
) -> AppResult<WorkingHours> {
    for t in [clock_in, clock_out, break_start, break_end].into_iter().flatten() {
        parse_minute_of_day(t)?;
    }

    Ok(WorkingHours {
        clock_in_time: clock_in.clone(),
        clock_out_time: clock_out.clone(),
        break_start_time: break_start.clone(),
        break_end_time: break_end.clone(),
    })
}

pub fn handle(cmd: &OrgCmd, cfg: &Config) -> AppResult<()> {
    let OrgCmd::Add {
        id,
        name,
        clock_in,
        clock_out,
        break_start,
        break_end,
    } = cmd;

    let org = OrganizationRow {
        id: id.clone(),
        name: name.clone(),
        default_hours: working_hours(clock_in, clock_out, break_start, break_end)?,
    };

    let pool = DbPool::new(&cfg.database)?;
    upsert_organization(&pool.conn, &org)?;
    write_log(&pool.conn, "org", id, &format!("Saved host company '{name}'"))?;

    success(format!("Host company {id} saved."));
    Ok(())
}
