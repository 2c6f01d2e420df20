use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for clockdesk
#[derive(Parser)]
#[command(
    name = "clockdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance admin console: reconcile clock events, review leave, corrections and devices",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act as this reviewer id instead of the configured one
    #[arg(global = true, long = "reviewer")]
    pub reviewer: Option<String>,

    /// Act as a host-company reviewer of this organization
    #[arg(global = true, long = "as-org")]
    pub as_org: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "edit", help = "Edit the configuration file ($EDITOR, or nano/notepad)")]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use (vim, nano, or a custom path)")]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage host companies
    Org {
        #[command(subcommand)]
        action: OrgCmd,
    },

    /// Manage staff members
    Staff {
        #[command(subcommand)]
        action: StaffCmd,
    },

    /// Record a raw clock event
    Clock {
        /// Staff id
        subject: String,

        /// RFC 3339 timestamp, or local "YYYY-MM-DD HH:MM[:SS]"
        timestamp: String,

        /// in | out | break-start | break-end
        kind: String,

        #[arg(long, default_value_t = 100, help = "Recognition confidence 0..=100")]
        confidence: u8,
    },

    /// Show a reconciled timesheet with lateness and period statistics
    Timesheet {
        subject: String,

        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD or start:end (default: this month)")]
        range: Option<String>,

        #[arg(long = "late-first", help = "List late days first")]
        late_first: bool,
    },

    /// Export a timesheet
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        subject: String,

        #[arg(long, value_name = "RANGE")]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Leave applications
    Leave {
        #[command(subcommand)]
        action: LeaveCmd,
    },

    /// Attendance correction requests
    Correction {
        #[command(subcommand)]
        action: CorrectionCmd,
    },

    /// Device trust
    Device {
        #[command(subcommand)]
        action: DeviceCmd,
    },

    /// Pending items the current reviewer can act on
    Pending,
}

#[derive(Subcommand)]
pub enum OrgCmd {
    /// Add or update a host company
    Add {
        id: String,
        name: String,
        #[arg(long = "clock-in")]
        clock_in: Option<String>,
        #[arg(long = "clock-out")]
        clock_out: Option<String>,
        #[arg(long = "break-start")]
        break_start: Option<String>,
        #[arg(long = "break-end")]
        break_end: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum StaffCmd {
    /// Add or update a staff member
    Add {
        id: String,
        name: String,
        #[arg(long, help = "Host company that registered this staff member")]
        org: Option<String>,
        #[arg(long = "clock-in")]
        clock_in: Option<String>,
        #[arg(long = "clock-out")]
        clock_out: Option<String>,
        #[arg(long = "break-start")]
        break_start: Option<String>,
        #[arg(long = "break-end")]
        break_end: Option<String>,
    },

    /// List staff members and their resolved schedule
    List,
}

#[derive(Subcommand)]
pub enum LeaveCmd {
    Submit {
        subject: String,
        #[arg(long = "type", default_value = "Annual")]
        leave_type: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, help = "Number of days (default: calendar days in the range)")]
        days: Option<f64>,
        #[arg(long)]
        reason: String,
    },
    List {
        #[arg(long, help = "pending | approved | rejected")]
        status: Option<String>,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CorrectionCmd {
    Submit {
        subject: String,
        #[arg(long)]
        date: String,
        #[arg(long = "type", help = "missing_clock_in | missing_clock_out | wrong_time | missing_break | other")]
        correction_type: String,
        #[arg(long)]
        description: String,
        #[arg(long = "clock-in")]
        clock_in: Option<String>,
        #[arg(long = "clock-out")]
        clock_out: Option<String>,
        #[arg(long = "break-start")]
        break_start: Option<String>,
        #[arg(long = "break-end")]
        break_end: Option<String>,
    },
    List {
        #[arg(long, help = "pending | approved | rejected")]
        status: Option<String>,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DeviceCmd {
    Register {
        subject: String,
        fingerprint: String,
        #[arg(long)]
        name: Option<String>,
    },
    List {
        #[arg(long, help = "pending | trusted | revoked")]
        status: Option<String>,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
    Revoke {
        id: String,
    },
}
