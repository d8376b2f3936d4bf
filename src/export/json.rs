use crate::core::report::ShiftReport;
use crate::errors::AppResult;
use std::path::Path;

/// Write the report (summary and rows) as pretty-printed JSON.
pub(crate) fn export_json(report: &ShiftReport, path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
