//! Aggregate figures for the dashboard.

use crate::models::{Team, Worker};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    pub team: Team,
    pub active: usize,
    pub away: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub away: usize,
    /// Share of active workers, rounded to a whole percent (0 for an empty roster).
    pub productivity: usize,
    /// Only teams with at least one member.
    pub teams: Vec<TeamStats>,
}

impl DashboardStats {
    pub fn compute(workers: &[Worker]) -> Self {
        let total = workers.len();
        let away = workers.iter().filter(|w| w.is_away()).count();
        let active = total - away;

        let productivity = if total > 0 {
            (active * 200 + total) / (2 * total)
        } else {
            0
        };

        let teams = Team::ALL
            .iter()
            .filter_map(|&team| {
                let members: Vec<&Worker> = workers.iter().filter(|w| w.team == team).collect();
                if members.is_empty() {
                    return None;
                }
                let away = members.iter().filter(|w| w.is_away()).count();
                Some(TeamStats {
                    team,
                    active: members.len() - away,
                    away,
                    total: members.len(),
                })
            })
            .collect();

        Self {
            total,
            active,
            away,
            productivity,
            teams,
        }
    }
}

/// Workers whose open absence is longer than `threshold_secs`, longest first.
pub fn overdue(
    workers: &[Worker],
    now: DateTime<Local>,
    threshold_secs: u64,
) -> Vec<(&Worker, u64)> {
    let mut out: Vec<(&Worker, u64)> = workers
        .iter()
        .filter(|w| w.is_away())
        .map(|w| (w, w.elapsed_away(now)))
        .filter(|(_, elapsed)| *elapsed > threshold_secs)
        .collect();

    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}
