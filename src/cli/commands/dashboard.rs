use crate::cli::commands::with_view;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::{DashboardStats, overdue};
use crate::errors::AppResult;
use crate::models::AbsenceLog;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, ORANGE, RED, RESET};
use crate::utils::table::Table;
use crate::utils::time::{format_clock, format_duration};
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Dashboard { recent } = cmd {
        with_view(cfg, now, |store| {
            let workers = store.workers();
            let stats = DashboardStats::compute(workers);

            header(format!(
                "Dashboard · shift from {} ({}h) · {}",
                cfg.shift_start,
                cfg.shift_duration_hours,
                now.format("%Y-%m-%d %H:%M:%S")
            ));

            println!("{CYAN}•{RESET} Total workers:    {}", stats.total);
            println!("{CYAN}•{RESET} Currently active: {GREEN}{}{RESET}", stats.active);
            println!("{CYAN}•{RESET} Currently away:   {RED}{}{RESET}", stats.away);
            println!("{CYAN}•{RESET} Productivity:     {}%", stats.productivity);
            println!();

            let mut teams = Table::new(["Team", "Active", "Away", "Total"]);
            for t in &stats.teams {
                teams.add_row(vec![
                    t.team.label(),
                    t.active.to_string(),
                    t.away.to_string(),
                    t.total.to_string(),
                ]);
            }
            print!("{}", teams.render());
            println!();

            let late = overdue(workers, now, cfg.alert_threshold_secs());
            if !late.is_empty() {
                println!(
                    "{ORANGE}⚠ Away longer than {} min:{RESET}",
                    cfg.alert_threshold_minutes
                );
                for (w, elapsed) in late {
                    println!("    {} ({}) {}", w.name, w.pc_number, format_clock(elapsed));
                }
                println!();
            }

            let latest: Vec<&AbsenceLog> = store.logs().iter().rev().take(*recent).collect();
            if latest.is_empty() {
                println!("No absence logs yet for this shift.");
                return Ok(());
            }

            let mut table = Table::new(["Returned", "PC", "Name", "Duration"]);
            for log in latest {
                let w = store.worker(&log.worker_id);
                table.add_row(vec![
                    log.end_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                    w.map(|w| w.pc_number.clone()).unwrap_or_default(),
                    w.map(|w| w.name.clone())
                        .unwrap_or_else(|| log.worker_id.to_string()),
                    format_duration(log.duration),
                ]);
            }
            println!("Recent absences:");
            print!("{}", table.render());

            Ok(())
        })?;
    }

    Ok(())
}
