use crate::core::report::{ReportRow, ShiftReport};
use crate::errors::AppResult;
use csv::Writer;
use std::io::Write;
use std::path::Path;

pub(crate) const HEADERS: [&str; 7] = [
    "Date",
    "PC Number",
    "Worker Name",
    "Start Time",
    "End Time",
    "Duration (Sec)",
    "Team",
];

fn row_to_record(r: &ReportRow) -> [String; 7] {
    [
        r.date.format("%Y-%m-%d").to_string(),
        r.pc_number.clone().unwrap_or_default(),
        r.worker_name.clone().unwrap_or_default(),
        r.start_time.format("%H:%M:%S").to_string(),
        r.end_time.format("%H:%M:%S").to_string(),
        r.duration.to_string(),
        r.team.map(|t| t.code().to_string()).unwrap_or_default(),
    ]
}

/// Write the report as CSV. The header is written even for an empty day.
pub(crate) fn write_csv<W: Write>(out: W, report: &ShiftReport) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(HEADERS)?;
    for r in &report.rows {
        wtr.write_record(row_to_record(r))?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_csv(report: &ShiftReport, path: &Path) -> AppResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, report)
}
