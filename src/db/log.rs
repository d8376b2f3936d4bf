use crate::errors::AppResult;
use chrono::{DateTime, Local};
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal audit line into the `log` table, stamped with the
/// instant the command acted at.
pub fn audit(
    conn: &Connection,
    at: DateTime<Local>,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    let now = at.to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn load_audit(conn: &Connection) -> AppResult<Vec<AuditEntry>> {
    let mut stmt = conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok(AuditEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::from_millis;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn audit_uses_the_given_instant() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        let at = from_millis(1_792_396_800_000);
        audit(&conn, at, "away", "worker-7", "Worker 7 stepped away").unwrap();

        let entry = load_audit(&conn)
            .unwrap()
            .into_iter()
            .find(|e| e.operation == "away")
            .unwrap();
        assert_eq!(entry.date, at.to_rfc3339());
        assert_eq!(entry.target, "worker-7");
    }
}
