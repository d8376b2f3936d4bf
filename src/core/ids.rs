//! Identifier generation for new workers and absence logs.

use crate::models::WorkerId;
use chrono::{DateTime, Local};

pub trait IdSource {
    fn next_worker_id(&mut self) -> WorkerId;
    fn next_log_id(&mut self) -> String;
}

/// Ids of the form `worker-<millis>-<n>` / `log-<millis>-<n>`, where
/// `<millis>` is fixed when the session starts and `<n>` counts up.
#[derive(Debug, Clone)]
pub struct SessionIds {
    stamp: i64,
    counter: u64,
}

impl SessionIds {
    pub fn starting_at(now: DateTime<Local>) -> Self {
        Self {
            stamp: now.timestamp_millis(),
            counter: 0,
        }
    }

    fn next(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}-{}", self.stamp, self.counter)
    }
}

impl Default for SessionIds {
    fn default() -> Self {
        Self::starting_at(Local::now())
    }
}

impl IdSource for SessionIds {
    fn next_worker_id(&mut self) -> WorkerId {
        WorkerId::from(self.next("worker"))
    }

    fn next_log_id(&mut self) -> String {
        self.next("log")
    }
}
