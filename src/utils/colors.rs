use crate::core::calculator::lateness::Lateness;
use crate::models::device::DeviceStatus;
use crate::models::request::RequestStatus;

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

pub fn color_for_lateness(l: Lateness) -> &'static str {
    match l {
        Lateness::Late => RED,
        Lateness::OnTime => GREEN,
        Lateness::Unknown => GREY,
    }
}

pub fn color_for_request_status(s: RequestStatus) -> &'static str {
    match s {
        RequestStatus::Pending => YELLOW,
        RequestStatus::Approved => GREEN,
        RequestStatus::Rejected => RED,
    }
}

pub fn color_for_device_status(s: DeviceStatus) -> &'static str {
    match s {
        DeviceStatus::Pending => YELLOW,
        DeviceStatus::Trusted => GREEN,
        DeviceStatus::Revoked => RED,
    }
}

/// Grey out placeholders (`--:--`, `00h 00m`, empty), leave values alone.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == "00h 00m" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
