//! SQLite mirror of the presence store.

use crate::core::store::{Snapshot, StoredState};
use crate::db::queries::{insert_log, load_logs, load_workers, upsert_worker};
use crate::errors::AppResult;
use crate::models::{AbsenceLog, Worker};
use chrono::{DateTime, Local};
use rusqlite::Connection;

/// Works on a plain connection or, through deref, on a transaction.
pub struct SqliteSnapshot<'c> {
    conn: &'c Connection,
    fallback_start: DateTime<Local>,
}

impl<'c> SqliteSnapshot<'c> {
    /// `now` stands in for a missing absence start on `Away` rows.
    pub fn new(conn: &'c Connection, now: DateTime<Local>) -> Self {
        Self {
            conn,
            fallback_start: now,
        }
    }

    pub fn conn(&self) -> &'c Connection {
        self.conn
    }
}

impl Snapshot for SqliteSnapshot<'_> {
    fn load_initial_state(&mut self) -> AppResult<StoredState> {
        let logs = load_logs(self.conn)?;
        let workers = load_workers(self.conn, self.fallback_start)?;
        Ok(StoredState {
            skipped_rows: workers.skipped + logs.skipped,
            workers: workers.rows,
            logs: logs.rows,
        })
    }

    fn save_worker(&mut self, worker: &Worker) -> AppResult<()> {
        upsert_worker(self.conn, worker)
    }

    fn append_log(&mut self, log: &AbsenceLog) -> AppResult<()> {
        insert_log(self.conn, log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{Clock, ManualClock, from_millis};
    use crate::core::ids::SessionIds;
    use crate::core::store::PresenceStore;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::queries::count_rows;
    use crate::models::{Status, Team, WorkerId};

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn first_load_seeds_and_persists_roster() {
        let conn = memory_db();
        let clock = ManualClock::at_millis(0);
        let mut snap = SqliteSnapshot::new(&conn, clock.now());

        let store = PresenceStore::restore(&mut snap, 6, &clock, SessionIds::default()).unwrap();
        assert_eq!(store.workers().len(), 6);

        let reloaded = snap.load_initial_state().unwrap();
        assert_eq!(reloaded.workers, store.workers());
    }

    #[test]
    fn toggles_survive_a_reload() {
        let conn = memory_db();
        let clock = ManualClock::at_millis(1_000);
        let mut snap = SqliteSnapshot::new(&conn, clock.now());

        let mut store =
            PresenceStore::restore(&mut snap, 3, &clock, SessionIds::default()).unwrap();
        let id = WorkerId::from("worker-2");

        let t = store.toggle(&id).unwrap();
        snap.record(&t).unwrap();

        let reloaded = snap.load_initial_state().unwrap();
        let w = reloaded.workers.iter().find(|w| w.id == id).unwrap();
        assert_eq!(w.status(), Status::Away);
        assert_eq!(w.last_absence_start().unwrap().timestamp_millis(), 1_000);

        clock.set_millis(61_000);
        let t = store.toggle(&id).unwrap();
        snap.record(&t).unwrap();

        let reloaded = snap.load_initial_state().unwrap();
        assert_eq!(reloaded.workers, store.workers());
        assert_eq!(reloaded.logs, store.logs());
        assert_eq!(reloaded.logs[0].duration, 60);
    }

    #[test]
    fn registered_workers_keep_roster_order() {
        let conn = memory_db();
        let clock = ManualClock::at_millis(0);
        let mut snap = SqliteSnapshot::new(&conn, clock.now());

        let mut store =
            PresenceStore::restore(&mut snap, 2, &clock, SessionIds::default()).unwrap();
        let alice = store.register_worker("Alice", "PC-99", Team::D);
        snap.save_worker(&alice).unwrap();

        let reloaded = snap.load_initial_state().unwrap();
        assert_eq!(reloaded.workers.len(), 3);
        assert_eq!(reloaded.workers[2].name, "Alice");
        assert_eq!(reloaded.workers[2].team, Team::D);
    }

    #[test]
    fn away_row_without_start_uses_fallback() {
        let conn = memory_db();
        conn.execute(
            "INSERT INTO workers (id, pc_number, name, team, status, last_absence_start, total_absence_today, position)
             VALUES ('w1', 'PC-01', 'Worker 1', 'A', 'Away', NULL, 12, 1)",
            [],
        )
        .unwrap();

        let now = from_millis(5_000);
        let mut snap = SqliteSnapshot::new(&conn, now);
        let state = snap.load_initial_state().unwrap();

        assert_eq!(state.workers[0].last_absence_start(), Some(now));
        assert_eq!(state.workers[0].total_absence_today, 12);
    }

    fn insert_bad_log(conn: &Connection) {
        conn.execute(
            "INSERT INTO absence_logs (id, worker_id, start_time, end_time, duration, date)
             VALUES ('log-x', 'worker-1', 0, 1000, 1, 'not-a-date')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn undecodable_log_is_skipped_and_the_rest_kept() {
        let conn = memory_db();
        let clock = ManualClock::at_millis(1_000);
        let mut snap = SqliteSnapshot::new(&conn, clock.now());

        let mut store =
            PresenceStore::restore(&mut snap, 3, &clock, SessionIds::default()).unwrap();
        let t = store.toggle(&WorkerId::from("worker-1")).unwrap();
        snap.record(&t).unwrap();
        clock.set_millis(4_000);
        let t = store.toggle(&WorkerId::from("worker-1")).unwrap();
        snap.record(&t).unwrap();
        insert_bad_log(&conn);

        let state = snap.load_initial_state().unwrap();
        assert_eq!(state.skipped_rows, 1);
        assert_eq!(state.workers.len(), 3);
        assert_eq!(state.logs.len(), 1);
        assert_eq!(state.logs[0].duration, 3);
    }

    #[test]
    fn bad_row_does_not_undo_later_sessions() {
        let conn = memory_db();
        let clock = ManualClock::at_millis(1_000);

        // First session: seed and register.
        let mut snap = SqliteSnapshot::new(&conn, clock.now());
        let mut store =
            PresenceStore::restore(&mut snap, 2, &clock, SessionIds::default()).unwrap();
        let alice = store.register_worker("Alice", "PC-99", Team::C);
        snap.save_worker(&alice).unwrap();

        insert_bad_log(&conn);

        // Second session: the bad row is present, toggle someone away.
        let mut snap = SqliteSnapshot::new(&conn, clock.now());
        let mut store =
            PresenceStore::restore(&mut snap, 2, &clock, SessionIds::default()).unwrap();
        assert_eq!(store.workers().len(), 3);
        let t = store.toggle(&WorkerId::from("worker-1")).unwrap();
        snap.record(&t).unwrap();

        // Third session sees both changes.
        let mut snap = SqliteSnapshot::new(&conn, clock.now());
        let store = PresenceStore::restore(&mut snap, 2, &clock, SessionIds::default()).unwrap();
        assert_eq!(store.workers().len(), 3);
        assert_eq!(store.worker(&alice.id).unwrap().name, "Alice");
        assert_eq!(
            store.worker(&WorkerId::from("worker-1")).unwrap().status(),
            Status::Away
        );
    }

    #[test]
    fn unreadable_worker_rows_are_not_deleted_by_the_seed() {
        let conn = memory_db();
        conn.execute(
            "INSERT INTO workers (id, pc_number, name, team, status, last_absence_start, total_absence_today, position)
             VALUES ('legacy-1', 'PC-77', 'Legacy', 'A', 'Active', NULL, 'lots', 1)",
            [],
        )
        .unwrap();

        let clock = ManualClock::at_millis(0);
        let mut snap = SqliteSnapshot::new(&conn, clock.now());
        let store = PresenceStore::restore(&mut snap, 4, &clock, SessionIds::default()).unwrap();

        assert_eq!(store.workers().len(), 4);
        assert_eq!(count_rows(&conn, "workers").unwrap(), 5);

        // The seed is now stored, so the next run does not seed again.
        let state = snap.load_initial_state().unwrap();
        assert_eq!(state.workers.len(), 4);
        assert_eq!(state.skipped_rows, 1);
    }

    #[test]
    fn view_leaves_an_empty_database_untouched() {
        let conn = memory_db();
        let clock = ManualClock::at_millis(0);
        let mut snap = SqliteSnapshot::new(&conn, clock.now());

        let store = PresenceStore::view(&mut snap, 66, &clock, SessionIds::default()).unwrap();

        assert_eq!(store.workers().len(), 66);
        assert_eq!(count_rows(&conn, "workers").unwrap(), 0);
    }
}
