use crate::cli::commands::with_view;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Team, Worker};
use crate::utils::colors::{RESET, color_for_absence, colorize_optional};
use crate::utils::table::Table;
use crate::utils::time::format_clock;
use chrono::{DateTime, Local};

/// Which workers to list.
#[derive(Debug, Default)]
pub struct RosterFilter {
    pub team: Option<Team>,
    pub search: Option<String>,
    pub away_only: bool,
}

impl RosterFilter {
    pub fn matches(&self, w: &Worker) -> bool {
        let team_ok = self.team.is_none_or(|t| w.team == t);

        let search_ok = self.search.as_ref().is_none_or(|s| {
            let needle = s.to_lowercase();
            w.name.to_lowercase().contains(&needle) || w.pc_number.to_lowercase().contains(&needle)
        });

        team_ok && search_ok && (!self.away_only || w.is_away())
    }
}

fn parse_team_filter(team: Option<&String>) -> AppResult<Option<Team>> {
    match team {
        None => Ok(None),
        Some(t) if t.eq_ignore_ascii_case("all") => Ok(None),
        Some(t) => Team::from_code(t)
            .map(Some)
            .ok_or_else(|| AppError::InvalidTeam(t.to_string())),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Roster { team, search, away } = cmd {
        let filter = RosterFilter {
            team: parse_team_filter(team.as_ref())?,
            search: search.clone().filter(|s| !s.trim().is_empty()),
            away_only: *away,
        };
        let threshold = cfg.alert_threshold_secs();

        let table = with_view(cfg, now, |store| {
            let mut table = Table::new(["ID", "PC", "Name", "Team", "Status", "Away for", "Today"]);

            for w in store.workers().iter().filter(|w| filter.matches(w)) {
                let elapsed = w.elapsed_away(now);
                let overdue = w.is_away() && elapsed > threshold;
                let color = color_for_absence(w.status(), overdue);

                let away_for = if w.is_away() {
                    let mark = if overdue { " ⚠" } else { "" };
                    format!("{color}{}{mark}{RESET}", format_clock(elapsed))
                } else {
                    colorize_optional("--")
                };

                table.add_row(vec![
                    w.id.to_string(),
                    w.pc_number.clone(),
                    w.name.clone(),
                    w.team.code().to_string(),
                    format!("{color}{}{RESET}", w.status().as_str()),
                    away_for,
                    colorize_optional(&format_clock(w.total_absence_today)),
                ]);
            }

            Ok(table)
        })?;

        if table.is_empty() {
            println!("No workers match the current filter.");
        } else {
            print!("{}", table.render());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::from_millis;
    use crate::core::seed::seed_roster;
    use crate::models::Presence;

    #[test]
    fn filter_combines_team_search_and_status() {
        let mut roster = seed_roster(66);
        roster[30].presence = Presence::Away {
            since: from_millis(0),
        };

        let by_team = RosterFilter {
            team: Some(Team::B),
            ..Default::default()
        };
        assert_eq!(roster.iter().filter(|w| by_team.matches(w)).count(), 22);

        let by_pc = RosterFilter {
            search: Some("pc-3".into()),
            ..Default::default()
        };
        // PC-30..PC-39
        assert_eq!(roster.iter().filter(|w| by_pc.matches(w)).count(), 10);

        let away_in_b = RosterFilter {
            team: Some(Team::B),
            away_only: true,
            ..Default::default()
        };
        let hits: Vec<_> = roster.iter().filter(|w| away_in_b.matches(w)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Worker 31");
    }

    #[test]
    fn all_means_no_team_filter() {
        assert_eq!(parse_team_filter(Some(&"ALL".to_string())).unwrap(), None);
        assert_eq!(
            parse_team_filter(Some(&"c".to_string())).unwrap(),
            Some(Team::C)
        );
        assert!(parse_team_filter(Some(&"Z".to_string())).is_err());
    }
}
