use crate::cli::commands::review::pending_counts;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let counts = pending_counts(&pool, &cfg.reviewer)?;

    header(format!("Pending for {}", cfg.reviewer.id));
    println!("Leave applications     : {}", counts.leave_applications);
    println!("Attendance corrections : {}", counts.attendance_corrections);
    println!("Devices                : {}", counts.devices);
    println!("Total                  : {}", counts.total());
    Ok(())
}
