use crate::models::worker::WorkerId;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// One completed absence interval. Only ever created when a worker returns,
/// so `end_time` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsenceLog {
    pub id: String,
    pub worker_id: WorkerId,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    /// Whole seconds, truncated.
    pub duration: u64,
    pub date: NaiveDate,
}

impl AbsenceLog {
    /// Close an absence that started at `start` and ended at `end`.
    /// A negative interval (clock moved backwards) yields a zero duration.
    pub fn closed(
        id: String,
        worker_id: WorkerId,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Self {
        let millis = (end - start).num_milliseconds().max(0);

        Self {
            id,
            worker_id,
            start_time: start,
            end_time: end,
            duration: (millis / 1000) as u64,
            date: end.date_naive(),
        }
    }
}
