use crate::cli::commands::with_store;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use chrono::{DateTime, Local};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its migrations
///  - the seed roster, when no roster is stored yet
pub fn handle(cli: &Cli, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = Config {
        database: db_path.to_string_lossy().to_string(),
        ..cfg.clone()
    };

    println!("⚙️  Initializing shiftguard…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    let roster_size = with_store(&cfg, now, |store, snap| {
        if let Err(e) = log::audit(
            snap.conn(),
            now,
            "init",
            "Database initialized",
            &format!("Database initialized at {}", &cfg.database),
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }
        Ok(store.workers().len())
    })?;

    success(format!(
        "Database initialized at {} ({} workers on the roster)",
        &cfg.database, roster_size
    ));
    Ok(())
}
