//! Per-date absence report, joined with the roster.

use crate::models::{AbsenceLog, Team, Worker, WorkerId};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// One report line. Worker fields are empty when the log points at a
/// worker that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub worker_id: WorkerId,
    pub pc_number: Option<String>,
    pub worker_name: Option<String>,
    pub team: Option<Team>,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftReport {
    pub date: NaiveDate,
    pub rows: Vec<ReportRow>,
    pub total_absences: usize,
    pub total_duration: u64,
    pub active_workers: usize,
}

impl ShiftReport {
    /// `logs` are expected newest first, as returned by `logs_for_date`.
    pub fn build(date: NaiveDate, workers: &[Worker], logs: &[&AbsenceLog]) -> Self {
        let rows: Vec<ReportRow> = logs
            .iter()
            .filter(|l| l.date == date)
            .map(|l| {
                let w = workers.iter().find(|w| w.id == l.worker_id);
                ReportRow {
                    date: l.date,
                    worker_id: l.worker_id.clone(),
                    pc_number: w.map(|w| w.pc_number.clone()),
                    worker_name: w.map(|w| w.name.clone()),
                    team: w.map(|w| w.team),
                    start_time: l.start_time,
                    end_time: l.end_time,
                    duration: l.duration,
                }
            })
            .collect();

        Self {
            date,
            total_absences: rows.len(),
            total_duration: rows.iter().map(|r| r.duration).sum(),
            active_workers: workers.iter().filter(|w| !w.is_away()).count(),
            rows,
        }
    }

    /// Suggested export file name for this report.
    pub fn default_file_name(&self, ext: &str) -> String {
        format!("shift_report_{}.{}", self.date.format("%Y-%m-%d"), ext)
    }
}
