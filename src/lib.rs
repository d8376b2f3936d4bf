//! shiftguard library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (presence store, SQLite snapshot, reporting, export).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::{DateTime, Local};
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg, now),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg, now),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Register { .. } => cli::commands::register::handle(&cli.command, cfg, now),
        Commands::Toggle { .. } => cli::commands::toggle::handle(&cli.command, cfg, now),
        Commands::Roster { .. } => cli::commands::roster::handle(&cli.command, cfg, now),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(&cli.command, cfg, now),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg, now),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, now),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load();

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // One instant per invocation; `--now` pins it.
    let now = match &cli.now {
        Some(s) => utils::date::parse_local_datetime(s)
            .ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
        None => Local::now(),
    };

    dispatch(&cli, &cfg, now)
}
