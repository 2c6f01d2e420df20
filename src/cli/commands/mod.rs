pub mod clock;
pub mod config;
pub mod correction;
pub mod device;
pub mod export;
pub mod init;
pub mod leave;
pub mod log;
pub mod org;
pub mod pending;
pub mod review;
pub mod staff;
pub mod timesheet;
