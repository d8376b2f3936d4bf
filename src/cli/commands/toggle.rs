use crate::cli::commands::with_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::{Snapshot, Transition};
use crate::db::log;
use crate::errors::AppResult;
use crate::models::WorkerId;
use crate::ui::messages::{success, warning};
use crate::utils::time::{format_clock, format_duration};
use chrono::{DateTime, Local};

/// Flip one worker between Active and Away.
///
/// An id or PC number that matches nobody leaves everything untouched;
/// it is reported as a warning, not an error.
pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Toggle { id, pc } = cmd {
        let outcome = with_store(cfg, now, |store, snap| {
            let target = match (pc, id) {
                (Some(pc), _) => store.find_by_pc(pc).map(|w| w.id.clone()),
                (None, Some(id)) => Some(WorkerId::from(id.trim())),
                (None, None) => None,
            };

            let Some(transition) = target.and_then(|id| store.toggle(&id)) else {
                return Ok(None);
            };

            snap.record(&transition)?;

            let w = transition.worker();
            let (operation, message) = match &transition {
                Transition::Departed { .. } => ("away", format!("{} left {}", w.name, w.pc_number)),
                Transition::Returned { log, .. } => (
                    "return",
                    format!("{} back after {}s ({})", w.name, log.duration, log.id),
                ),
            };
            log::audit(snap.conn(), now, operation, w.id.as_str(), &message)?;

            Ok(Some(transition))
        })?;

        match outcome {
            Some(Transition::Departed { worker }) => success(format!(
                "🚶 {} ({}) is now Away since {}",
                worker.name,
                worker.pc_number,
                now.format("%H:%M:%S")
            )),
            Some(Transition::Returned { worker, log }) => success(format!(
                "🪑 {} ({}) is back after {}. Away today: {}",
                worker.name,
                worker.pc_number,
                format_duration(log.duration),
                format_clock(worker.total_absence_today)
            )),
            None => {
                let what = pc
                    .as_deref()
                    .map(|p| format!("PC '{p}'"))
                    .or_else(|| id.as_deref().map(|i| format!("id '{i}'")))
                    .unwrap_or_default();
                warning(format!("No worker matches {what}; nothing changed."));
            }
        }
    }

    Ok(())
}
