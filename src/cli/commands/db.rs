use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats::{self, HealthReport};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use chrono::{DateTime, Local};

fn print_health(report: &HealthReport) {
    if report.integrity != "ok" {
        warning(format!("SQLite integrity check failed: {}", report.integrity));
    }
    if report.unreadable_workers > 0 {
        warning(format!(
            "{} worker row(s) cannot be read and are ignored by every command",
            report.unreadable_workers
        ));
    }
    if report.unreadable_logs > 0 {
        warning(format!(
            "{} absence log(s) cannot be read and are left out of reports",
            report.unreadable_logs
        ));
    }
    if report.orphaned_logs > 0 {
        warning(format!(
            "{} absence log(s) belong to workers no longer on the roster",
            report.orphaned_logs
        ));
    }
    if report.away_without_start > 0 {
        warning(format!(
            "{} away worker(s) have no recorded start; their next return logs 0s",
            report.away_without_start
        ));
    }
    if report.is_clean() {
        success("Roster and absence logs are consistent.");
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        // Opening already applies pending migrations.
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Presence schema is up to date.");
        }

        if *show_info {
            stats::print_db_info(&pool.conn, &cfg.database)?;
        }

        if *check {
            info("Checking roster and absence logs…");
            print_health(&stats::check_health(&pool.conn, now)?);
        }

        if *vacuum {
            pool.conn.execute_batch("VACUUM;")?;
            success("Database compacted.");
        }
    }

    Ok(())
}
