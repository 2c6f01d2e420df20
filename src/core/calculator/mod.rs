pub mod lateness;
pub mod stats;
pub mod timesheet;
