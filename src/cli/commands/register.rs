use crate::cli::commands::with_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::Snapshot;
use crate::db::log;
use crate::errors::{AppError, AppResult};
use crate::models::Team;
use crate::ui::messages::success;
use chrono::{DateTime, Local};

/// Add a worker to the roster.
pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Register {
        name,
        pc_number,
        team,
    } = cmd
    {
        let name = name.trim();
        let pc_number = pc_number.trim();

        if name.is_empty() {
            return Err(AppError::InvalidInput("worker name must not be empty".into()));
        }
        if pc_number.is_empty() {
            return Err(AppError::InvalidInput("PC number must not be empty".into()));
        }

        let team_code = team.as_deref().unwrap_or(&cfg.default_team);
        let team =
            Team::from_code(team_code).ok_or_else(|| AppError::InvalidTeam(team_code.to_string()))?;

        let worker = with_store(cfg, now, |store, snap| {
            let worker = store.register_worker(name, pc_number, team);
            snap.save_worker(&worker)?;
            log::audit(
                snap.conn(),
                now,
                "register",
                worker.id.as_str(),
                &format!("{} on {} ({})", worker.name, worker.pc_number, team.label()),
            )?;
            Ok(worker)
        })?;

        success(format!(
            "Registered {} on {} in {} (id: {})",
            worker.name,
            worker.pc_number,
            worker.team.label(),
            worker.id
        ));
    }

    Ok(())
}
