use crate::cli::commands::org::working_hours;
use crate::cli::parser::StaffCmd;
use crate::config::Config;
use crate::db::log::write_log;
use crate::db::models::SubjectRow;
use crate::db::pool::DbPool;
use crate::db::queries::{list_subjects, load_organization, resolve_schedule, upsert_subject};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::ScheduleSource;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &StaffCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        StaffCmd::Add {
            id,
            name,
            org,
            clock_in,
            clock_out,
            break_start,
            break_end,
        } => {
            if let Some(org_id) = org
                && load_organization(&pool.conn, org_id)?.is_none()
            {
                return Err(AppError::NotFound(format!("host company {org_id}")));
            }

            let subject = SubjectRow {
                id: id.clone(),
                name: name.clone(),
                org_id: org.clone(),
                hours: working_hours(clock_in, clock_out, break_start, break_end)?,
            };

            upsert_subject(&pool.conn, &subject)?;
            write_log(&pool.conn, "staff", id, &format!("Saved staff member '{name}'"))?;
            success(format!("Staff member {id} saved."));
        }

        StaffCmd::List => {
            let subjects = list_subjects(&pool.conn)?;
            if subjects.is_empty() {
                info("No staff members registered.");
                return Ok(());
            }

            let mut table = Table::new(
                &["ID", "Name", "Host company", "Schedule", "Source"],
                &cfg.separator_char,
            );

            for s in &subjects {
                let (hours, source) = match resolve_schedule(&pool.conn, s)? {
                    Some(sched) => (
                        format!("{} - {}", sched.clock_in_time, sched.clock_out_time),
                        match sched.source {
                            ScheduleSource::Individual => "individual",
                            ScheduleSource::HostCompany => "host company",
                        },
                    ),
                    None => ("--".to_string(), "none"),
                };

                table.add_row(vec![
                    s.id.clone(),
                    s.name.clone(),
                    s.org_id.clone().unwrap_or_else(|| "--".to_string()),
                    hours,
                    source.to_string(),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
