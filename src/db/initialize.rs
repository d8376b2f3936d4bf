use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::time::Duration;

/// Initialize the database.
/// Schema creation and upgrades are left to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    run_pending_migrations(conn)?;
    Ok(())
}
