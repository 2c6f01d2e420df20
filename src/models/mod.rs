pub mod attendance;
pub mod clock_event;
pub mod date_range;
pub mod device;
pub mod period_summary;
pub mod request;
pub mod reviewer;
pub mod schedule;
