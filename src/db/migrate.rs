use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there,
/// so it has to come first.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn create_workers_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id                   TEXT PRIMARY KEY,
            pc_number            TEXT NOT NULL,
            name                 TEXT NOT NULL,
            team                 TEXT NOT NULL CHECK(team IN ('A','B','C','D')),
            status               TEXT NOT NULL DEFAULT 'Active' CHECK(status IN ('Active','Away')),
            last_absence_start   INTEGER,
            total_absence_today  INTEGER NOT NULL DEFAULT 0,
            position             INTEGER NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_absence_logs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS absence_logs (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            id          TEXT NOT NULL UNIQUE,
            worker_id   TEXT NOT NULL,
            start_time  INTEGER NOT NULL,
            end_time    INTEGER NOT NULL,
            duration    INTEGER NOT NULL CHECK(duration >= 0),
            date        TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Run `sql` once, then mark `version` as applied in the `log` table.
fn apply_once(conn: &Connection, version: &str, sql: &str, message: &str) -> Result<()> {
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(sql)?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;

    success(format!("Migration applied: {version} → {message}"));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from `db::initialize::init_db()` on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "workers")? {
        create_workers_table(conn)?;
    }

    if !table_exists(conn, "absence_logs")? {
        create_absence_logs_table(conn)?;
    }

    apply_once(
        conn,
        "20261019_0001_absence_logs_indexes",
        r#"
        CREATE INDEX IF NOT EXISTS idx_absence_logs_date ON absence_logs(date);
        CREATE INDEX IF NOT EXISTS idx_absence_logs_worker ON absence_logs(worker_id);
        "#,
        "Added date/worker indexes to absence_logs",
    )?;

    Ok(())
}
