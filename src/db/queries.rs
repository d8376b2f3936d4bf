use crate::core::clock::from_millis;
use crate::errors::{AppError, AppResult};
use crate::models::{AbsenceLog, Presence, Status, Team, Worker, WorkerId};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

/// Decode a `workers` row.
///
/// An `Away` row with no recorded start is read as away since
/// `fallback_start`, so closing it produces a zero-length absence.
pub fn map_worker_row(row: &Row, fallback_start: DateTime<Local>) -> Result<Worker> {
    let team_str: String = row.get("team")?;
    let team = Team::from_db_str(&team_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidTeam(team_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = Status::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            4,
            AppError::InvalidInput(format!("Invalid status: {status_str}")),
        )
    })?;

    let start: Option<i64> = row.get("last_absence_start")?;
    let presence = match status {
        Status::Active => Presence::Active,
        Status::Away => Presence::Away {
            since: start.map(from_millis).unwrap_or(fallback_start),
        },
    };

    let total: i64 = row.get("total_absence_today")?;

    Ok(Worker {
        id: WorkerId::from(row.get::<_, String>("id")?),
        pc_number: row.get("pc_number")?,
        name: row.get("name")?,
        team,
        presence,
        total_absence_today: total.max(0) as u64,
    })
}

pub fn map_log_row(row: &Row) -> Result<AbsenceLog> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(6, AppError::InvalidDate(date_str.clone())))?;

    let duration: i64 = row.get("duration")?;

    Ok(AbsenceLog {
        id: row.get("id")?,
        worker_id: WorkerId::from(row.get::<_, String>("worker_id")?),
        start_time: from_millis(row.get("start_time")?),
        end_time: from_millis(row.get("end_time")?),
        duration: duration.max(0) as u64,
        date,
    })
}

/// Rows that decoded, and how many did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

fn is_decode_error(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)
    )
}

/// Keep every row that maps cleanly. A row whose values cannot be decoded is
/// counted and skipped; any other error aborts the read.
fn collect_decoded<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Decoded<T>> {
    let mut out = Decoded {
        rows: Vec::new(),
        skipped: 0,
    };

    for r in rows {
        match r {
            Ok(v) => out.rows.push(v),
            Err(e) if is_decode_error(&e) => out.skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(out)
}

pub fn load_workers(
    conn: &Connection,
    fallback_start: DateTime<Local>,
) -> AppResult<Decoded<Worker>> {
    let mut stmt = conn.prepare(
        "SELECT id, pc_number, name, team, status, last_absence_start, total_absence_today
         FROM workers
         ORDER BY position ASC",
    )?;

    let rows = stmt.query_map([], |row| map_worker_row(row, fallback_start))?;
    collect_decoded(rows)
}

/// All absence logs, oldest first.
pub fn load_logs(conn: &Connection) -> AppResult<Decoded<AbsenceLog>> {
    let mut stmt = conn.prepare(
        "SELECT id, worker_id, start_time, end_time, duration, date
         FROM absence_logs
         ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map([], map_log_row)?;
    collect_decoded(rows)
}

/// Insert or update a worker. New workers go to the end of the roster.
pub fn upsert_worker(conn: &Connection, w: &Worker) -> AppResult<()> {
    conn.execute(
        "INSERT INTO workers (id, pc_number, name, team, status, last_absence_start, total_absence_today, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, (SELECT COALESCE(MAX(position), 0) + 1 FROM workers))
         ON CONFLICT(id) DO UPDATE SET
            pc_number = excluded.pc_number,
            name = excluded.name,
            team = excluded.team,
            status = excluded.status,
            last_absence_start = excluded.last_absence_start,
            total_absence_today = excluded.total_absence_today",
        params![
            w.id.as_str(),
            w.pc_number,
            w.name,
            w.team.to_db_str(),
            w.status().as_str(),
            w.last_absence_start().map(|t| t.timestamp_millis()),
            w.total_absence_today as i64,
        ],
    )?;
    Ok(())
}

pub fn insert_log(conn: &Connection, log: &AbsenceLog) -> AppResult<()> {
    conn.execute(
        "INSERT INTO absence_logs (id, worker_id, start_time, end_time, duration, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.id,
            log.worker_id.as_str(),
            log.start_time.timestamp_millis(),
            log.end_time.timestamp_millis(),
            log.duration as i64,
            log.date.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(())
}

pub fn count_rows(conn: &Connection, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}
