use crate::models::team::Team;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkerId {
    fn from(s: &str) -> Self {
        WorkerId(s.to_string())
    }
}

impl From<String> for WorkerId {
    fn from(s: String) -> Self {
        WorkerId(s)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a worker is at their terminal. An absence always carries its
/// start, so "away since nowhen" cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum Presence {
    Active,
    Away { since: DateTime<Local> },
}

/// Flat status label, as shown in tables and stored in the DB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Active,
    Away,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Away => "Away",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Status::Active),
            "Away" => Some(Status::Away),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: WorkerId,
    pub pc_number: String,
    pub name: String,
    pub team: Team,
    pub presence: Presence,
    /// Seconds spent away during the current shift.
    pub total_absence_today: u64,
}

impl Worker {
    /// A freshly registered worker: at their desk, nothing accumulated.
    pub fn new(id: WorkerId, name: &str, pc_number: &str, team: Team) -> Self {
        Self {
            id,
            pc_number: pc_number.to_string(),
            name: name.to_string(),
            team,
            presence: Presence::Active,
            total_absence_today: 0,
        }
    }

    pub fn status(&self) -> Status {
        match self.presence {
            Presence::Active => Status::Active,
            Presence::Away { .. } => Status::Away,
        }
    }

    pub fn last_absence_start(&self) -> Option<DateTime<Local>> {
        match self.presence {
            Presence::Active => None,
            Presence::Away { since } => Some(since),
        }
    }

    pub fn is_away(&self) -> bool {
        matches!(self.presence, Presence::Away { .. })
    }

    /// Seconds of the currently open absence, 0 when active.
    pub fn elapsed_away(&self, now: DateTime<Local>) -> u64 {
        self.last_absence_start()
            .map(|since| ((now - since).num_milliseconds().max(0) / 1000) as u64)
            .unwrap_or(0)
    }
}
