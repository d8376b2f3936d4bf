use crate::db::queries::{count_rows, load_logs, load_workers};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROW COUNTS
    //
    let workers = count_rows(conn, "workers")?;
    let away: i64 = conn.query_row(
        "SELECT COUNT(*) FROM workers WHERE status = 'Away'",
        [],
        |row| row.get(0),
    )?;
    let logs = count_rows(conn, "absence_logs")?;

    println!(
        "{}• Workers:{} {}{}{} ({} away)",
        CYAN, RESET, GREEN, workers, RESET, away
    );
    println!("{}• Absence logs:{} {}{}{}", CYAN, RESET, GREEN, logs, RESET);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = conn
        .query_row("SELECT MIN(date) FROM absence_logs", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();
    let last_date: Option<String> = conn
        .query_row("SELECT MAX(date) FROM absence_logs", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();

    let fmt = |d: Option<String>| d.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first_date));
    println!("    to:   {}", fmt(last_date));

    println!();
    Ok(())
}

/// What `db --check` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// `PRAGMA integrity_check` result, `"ok"` when the file is sound.
    pub integrity: String,
    pub unreadable_workers: usize,
    pub unreadable_logs: usize,
    /// Logs whose worker is no longer on the roster.
    pub orphaned_logs: i64,
    /// `Away` rows with no recorded start.
    pub away_without_start: i64,
}

impl HealthReport {
    pub fn is_clean(&self) -> bool {
        self.integrity == "ok"
            && self.unreadable_workers == 0
            && self.unreadable_logs == 0
            && self.orphaned_logs == 0
            && self.away_without_start == 0
    }
}

pub fn check_health(conn: &Connection, now: DateTime<Local>) -> AppResult<HealthReport> {
    let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    let orphaned_logs: i64 = conn.query_row(
        "SELECT COUNT(*) FROM absence_logs
         WHERE worker_id NOT IN (SELECT id FROM workers)",
        [],
        |row| row.get(0),
    )?;

    let away_without_start: i64 = conn.query_row(
        "SELECT COUNT(*) FROM workers
         WHERE status = 'Away' AND last_absence_start IS NULL",
        [],
        |row| row.get(0),
    )?;

    Ok(HealthReport {
        integrity,
        unreadable_workers: load_workers(conn, now)?.skipped,
        unreadable_logs: load_logs(conn)?.skipped,
        orphaned_logs,
        away_without_start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::from_millis;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn health_counts_presence_problems() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO workers (id, pc_number, name, team, status, last_absence_start, total_absence_today, position)
             VALUES ('w1', 'PC-01', 'Worker 1', 'A', 'Away', NULL, 0, 1);
             INSERT INTO absence_logs (id, worker_id, start_time, end_time, duration, date)
             VALUES ('log-1', 'gone', 0, 1000, 1, '2026-10-19');
             INSERT INTO absence_logs (id, worker_id, start_time, end_time, duration, date)
             VALUES ('log-2', 'w1', 0, 1000, 1, 'garbage');",
        )
        .unwrap();

        let report = check_health(&conn, from_millis(0)).unwrap();

        assert_eq!(report.integrity, "ok");
        assert_eq!(report.unreadable_workers, 0);
        assert_eq!(report.unreadable_logs, 1);
        assert_eq!(report.orphaned_logs, 1);
        assert_eq!(report.away_without_start, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_database_is_clean() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        assert!(check_health(&conn, from_millis(0)).unwrap().is_clean());
    }
}
