use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
    C,
    D,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::A, Team::B, Team::C, Team::D];

    pub fn code(&self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
            Team::C => "C",
            Team::D => "D",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Team::A),
            "B" => Some(Team::B),
            "C" => Some(Team::C),
            "D" => Some(Team::D),
            _ => None,
        }
    }

    /// Helper: accept `a`, `B`, `team c`, ... from the command line
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_uppercase();
        let bare = upper.strip_prefix("TEAM").unwrap_or(&upper).trim();
        Team::from_db_str(bare)
    }

    pub fn label(&self) -> String {
        format!("Team {}", self.code())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
