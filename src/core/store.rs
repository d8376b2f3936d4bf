//! Presence state store.
//!
//! Owns the roster and the absence-log collection. The only mutations are
//! [`PresenceStore::toggle`] and [`PresenceStore::register_worker`]; every
//! other component reads through the accessors.
//!
//! The store does no I/O. Each mutation hands back what changed so the
//! caller can forward it to a [`Snapshot`].

use crate::core::clock::Clock;
use crate::core::ids::IdSource;
use crate::core::seed::seed_roster;
use crate::errors::AppResult;
use crate::models::{AbsenceLog, Presence, Team, Worker, WorkerId};
use crate::ui::messages::warning;
use chrono::NaiveDate;

/// What a successful `toggle` did to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Active → Away. The absence is open, nothing logged yet.
    Departed { worker: Worker },
    /// Away → Active. The closed absence was appended to the log collection.
    Returned { worker: Worker, log: AbsenceLog },
}

impl Transition {
    pub fn worker(&self) -> &Worker {
        match self {
            Transition::Departed { worker } | Transition::Returned { worker, .. } => worker,
        }
    }

    pub fn log(&self) -> Option<&AbsenceLog> {
        match self {
            Transition::Departed { .. } => None,
            Transition::Returned { log, .. } => Some(log),
        }
    }
}

/// Rows read back from durable storage.
#[derive(Debug, Default, Clone)]
pub struct StoredState {
    pub workers: Vec<Worker>,
    pub logs: Vec<AbsenceLog>,
    /// Stored rows that could not be decoded and were left out.
    pub skipped_rows: usize,
}

/// Durable mirror of the store.
pub trait Snapshot {
    fn load_initial_state(&mut self) -> AppResult<StoredState>;

    fn save_worker(&mut self, worker: &Worker) -> AppResult<()>;

    fn append_log(&mut self, log: &AbsenceLog) -> AppResult<()>;

    /// Write a whole roster (used when seeding). Rows already stored under
    /// other ids are left untouched.
    fn save_roster(&mut self, workers: &[Worker]) -> AppResult<()> {
        for w in workers {
            self.save_worker(w)?;
        }
        Ok(())
    }

    /// Persist everything a toggle changed.
    fn record(&mut self, transition: &Transition) -> AppResult<()> {
        if let Some(log) = transition.log() {
            self.append_log(log)?;
        }
        self.save_worker(transition.worker())
    }
}

pub struct PresenceStore<C: Clock, I: IdSource> {
    workers: Vec<Worker>,
    logs: Vec<AbsenceLog>,
    clock: C,
    ids: I,
}

impl<C: Clock, I: IdSource> PresenceStore<C, I> {
    pub fn new(workers: Vec<Worker>, logs: Vec<AbsenceLog>, clock: C, ids: I) -> Self {
        Self {
            workers,
            logs,
            clock,
            ids,
        }
    }

    /// Load the store from `snapshot` for a command that mutates it.
    ///
    /// Rows that cannot be decoded are skipped with a warning; everything
    /// else, logs included, is kept. When no worker could be read the roster
    /// falls back to `seed_size` seeded workers, and the seed is written back.
    pub fn restore<S: Snapshot>(
        snapshot: &mut S,
        seed_size: usize,
        clock: C,
        ids: I,
    ) -> AppResult<Self> {
        let (state, seeded) = Self::load(snapshot, seed_size)?;

        if seeded {
            snapshot.save_roster(&state.workers)?;
        }

        Ok(Self::new(state.workers, state.logs, clock, ids))
    }

    /// Same as [`restore`](Self::restore) but never writes, not even the
    /// seed roster.
    pub fn view<S: Snapshot>(
        snapshot: &mut S,
        seed_size: usize,
        clock: C,
        ids: I,
    ) -> AppResult<Self> {
        let (state, _) = Self::load(snapshot, seed_size)?;
        Ok(Self::new(state.workers, state.logs, clock, ids))
    }

    fn load<S: Snapshot>(snapshot: &mut S, seed_size: usize) -> AppResult<(StoredState, bool)> {
        let mut state = snapshot.load_initial_state()?;

        if state.skipped_rows > 0 {
            warning(format!(
                "Skipped {} stored row(s) that could not be read.",
                state.skipped_rows
            ));
        }

        if !state.workers.is_empty() {
            return Ok((state, false));
        }

        if state.skipped_rows > 0 {
            warning("No stored worker could be read; starting from the seed roster.");
        }
        state.workers = seed_roster(seed_size);
        Ok((state, true))
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// All absence logs, oldest first.
    pub fn logs(&self) -> &[AbsenceLog] {
        &self.logs
    }

    pub fn worker(&self, id: &WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| &w.id == id)
    }

    /// First worker assigned to `pc_number` (case-insensitive).
    pub fn find_by_pc(&self, pc_number: &str) -> Option<&Worker> {
        self.workers
            .iter()
            .find(|w| w.pc_number.eq_ignore_ascii_case(pc_number.trim()))
    }

    /// Logs recorded on `date`, newest first.
    pub fn logs_for_date(&self, date: NaiveDate) -> Vec<&AbsenceLog> {
        self.logs.iter().rev().filter(|l| l.date == date).collect()
    }

    /// Flip a worker between Active and Away.
    ///
    /// Returning from an absence appends exactly one log and adds its
    /// duration to the worker's daily total. An unknown id changes nothing
    /// and yields `None`.
    pub fn toggle(&mut self, worker_id: &WorkerId) -> Option<Transition> {
        let idx = self.workers.iter().position(|w| &w.id == worker_id)?;
        let now = self.clock.now();

        match self.workers[idx].presence {
            Presence::Active => {
                let worker = &mut self.workers[idx];
                worker.presence = Presence::Away { since: now };

                Some(Transition::Departed {
                    worker: worker.clone(),
                })
            }
            Presence::Away { since } => {
                let log_id = self.fresh_log_id();
                let log = AbsenceLog::closed(log_id, worker_id.clone(), since, now);

                let worker = &mut self.workers[idx];
                worker.presence = Presence::Active;
                worker.total_absence_today += log.duration;
                let worker = worker.clone();

                self.logs.push(log.clone());

                Some(Transition::Returned { worker, log })
            }
        }
    }

    /// Append a new active worker. Input is expected to be validated by the
    /// caller; PC numbers are not checked for uniqueness.
    pub fn register_worker(&mut self, name: &str, pc_number: &str, team: Team) -> Worker {
        let id = self.fresh_worker_id();
        let worker = Worker::new(id, name, pc_number, team);
        self.workers.push(worker.clone());
        worker
    }

    fn fresh_worker_id(&mut self) -> WorkerId {
        loop {
            let id = self.ids.next_worker_id();
            if self.worker(&id).is_none() {
                return id;
            }
        }
    }

    fn fresh_log_id(&mut self) -> String {
        loop {
            let id = self.ids.next_log_id();
            if !self.logs.iter().any(|l| l.id == id) {
                return id;
            }
        }
    }
}
