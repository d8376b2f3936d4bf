pub mod config;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod register;
pub mod report;
pub mod roster;
pub mod toggle;

use crate::config::Config;
use crate::core::clock::FixedClock;
use crate::core::ids::SessionIds;
use crate::core::store::PresenceStore;
use crate::db::pool::DbPool;
use crate::db::snapshot::SqliteSnapshot;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::{DateTime, Local, NaiveDate};

pub(crate) type Store = PresenceStore<FixedClock, SessionIds>;

/// Open the database, restore the store and run `f` inside one write
/// transaction. Everything `f` persists is committed together.
pub(crate) fn with_store<T, F>(cfg: &Config, now: DateTime<Local>, f: F) -> AppResult<T>
where
    F: FnOnce(&mut Store, &mut SqliteSnapshot<'_>) -> AppResult<T>,
{
    let mut pool = DbPool::new(&cfg.database)?;
    let tx = pool.write_tx()?;

    let out = {
        let mut snap = SqliteSnapshot::new(&tx, now);
        let mut store = PresenceStore::restore(
            &mut snap,
            cfg.seed_roster_size,
            FixedClock(now),
            SessionIds::starting_at(now),
        )?;
        f(&mut store, &mut snap)?
    };

    tx.commit()?;
    Ok(out)
}

/// Read-only counterpart of [`with_store`]. The store is restored inside a
/// read transaction and nothing is written back; an empty database is shown
/// with the seed roster without storing it.
pub(crate) fn with_view<T, F>(cfg: &Config, now: DateTime<Local>, f: F) -> AppResult<T>
where
    F: FnOnce(&Store) -> AppResult<T>,
{
    let mut pool = DbPool::new(&cfg.database)?;
    let tx = pool.read_tx()?;

    let mut snap = SqliteSnapshot::new(&tx, now);
    let store = PresenceStore::view(
        &mut snap,
        cfg.seed_roster_size,
        FixedClock(now),
        SessionIds::starting_at(now),
    )?;

    f(&store)
}

/// `--date` value, or the local date of `now`.
pub(crate) fn resolve_date(arg: Option<&String>, now: DateTime<Local>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(now.date_naive()),
    }
}
