use crate::cli::commands::review::{access_cell, report_pending};
use crate::cli::parser::DeviceCmd;
use crate::config::Config;
use crate::core::workflow::device::DeviceTrustWorkflow;
use crate::core::workflow::policy::ReviewAuthorizationPolicy;
use crate::db::devices::{insert_device, list_devices, load_device, save_transition};
use crate::db::log::{PendingAudit, write_log};
use crate::db::pool::DbPool;
use crate::db::queries::load_subject;
use crate::errors::{AppError, AppResult};
use crate::models::device::{DeviceAction, DeviceStatus};
use crate::ui::messages::{info, success};
use crate::utils::colors::{color_for_device_status, paint};
use crate::utils::table::Table;
use chrono::Utc;

pub fn handle(cmd: &DeviceCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        DeviceCmd::Register {
            subject,
            fingerprint,
            name,
        } => {
            if fingerprint.trim().is_empty() {
                return Err(AppError::Validation("device fingerprint is required".into()));
            }

            let row = load_subject(&pool.conn, subject)?;
            let device = insert_device(
                &pool.conn,
                subject,
                fingerprint.trim(),
                name.as_deref(),
                row.org_id.as_deref(),
                Utc::now(),
            )?;

            write_log(
                &pool.conn,
                "register",
                &format!("device {}", device.id),
                &format!("Device {} registered for {subject}", device.fingerprint),
            )?;
            success(format!("Device {} registered, awaiting approval.", device.id));
        }

        DeviceCmd::List { status } => {
            let status = status
                .as_deref()
                .map(|s| {
                    DeviceStatus::from_db_str(&s.trim().to_lowercase())
                        .ok_or_else(|| AppError::Validation(format!("unknown device status '{s}'")))
                })
                .transpose()?;

            let devices = list_devices(&pool.conn, status)?;
            if devices.is_empty() {
                info("No devices found.");
                return Ok(());
            }

            let mut table = Table::new(
                &["ID", "Staff", "Fingerprint", "Name", "Registered", "Status", "Access"],
                &cfg.separator_char,
            );
            for d in &devices {
                table.add_row(vec![
                    d.id.clone(),
                    d.subject_id.clone(),
                    d.fingerprint.clone(),
                    d.device_name.clone().unwrap_or_else(|| "--".to_string()),
                    d.registered_at.format("%Y-%m-%d %H:%M").to_string(),
                    paint(color_for_device_status(d.status), d.status.to_db_str()),
                    access_cell(ReviewAuthorizationPolicy::review_access(&cfg.reviewer, d)),
                ]);
            }
            print!("{}", table.render());
        }

        DeviceCmd::Approve { id } => transition(&pool, cfg, id, DeviceAction::Approve)?,
        DeviceCmd::Reject { id } => transition(&pool, cfg, id, DeviceAction::Reject)?,
        DeviceCmd::Revoke { id } => transition(&pool, cfg, id, DeviceAction::Revoke)?,
    }

    Ok(())
}

fn transition(pool: &DbPool, cfg: &Config, id: &str, action: DeviceAction) -> AppResult<()> {
    let device = load_device(&pool.conn, id)?;

    if !ReviewAuthorizationPolicy::can_review(&cfg.reviewer, &device) {
        return Err(AppError::Unauthorized(format!(
            "reviewer {} may not {} device {id}",
            cfg.reviewer.id,
            action.as_str()
        )));
    }

    let updated = DeviceTrustWorkflow::transition(&device, action, Utc::now())?;
    let audit = PendingAudit::new(
        action.as_str(),
        format!("device {id}"),
        format!("{} → {} by {}", device.status, updated.status, cfg.reviewer.id),
    );
    save_transition(&pool.conn, &device, &updated, &audit)?;

    let stored = load_device(&pool.conn, id)?;
    success(format!("Device {} is now {}.", stored.id, stored.status));
    report_pending(pool, &cfg.reviewer)
}
