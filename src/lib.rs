//! clockdesk library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! attendance and review core.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::reviewer::ReviewerContext;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Org { action } => cli::commands::org::handle(action, cfg),
        Commands::Staff { action } => cli::commands::staff::handle(action, cfg),
        Commands::Clock { .. } => cli::commands::clock::handle(&cli.command, cfg),
        Commands::Timesheet { .. } => cli::commands::timesheet::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Leave { action } => cli::commands::leave::handle(action, cfg),
        Commands::Correction { action } => cli::commands::correction::handle(action, cfg),
        Commands::Device { action } => cli::commands::device::handle(action, cfg),
        Commands::Pending => cli::commands::pending::handle(cfg),
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // a second init (e.g. run() called twice in one process) is not an error
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    init_tracing(&cfg.log_level);

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    if let Some(org) = &cli.as_org {
        let id = cli.reviewer.clone().unwrap_or_else(|| org.clone());
        cfg.reviewer = ReviewerContext::host_company(id, org.clone());
    } else if let Some(id) = &cli.reviewer {
        cfg.reviewer.id = id.clone();
    }

    tracing::debug!(database = %cfg.database, reviewer = %cfg.reviewer.id, "configuration loaded");

    dispatch(&cli, &cfg)
}
