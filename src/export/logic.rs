// src/export/logic.rs

use crate::core::report::ShiftReport;
use crate::errors::AppResult;
use crate::export::csv::export_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::{ExportFormat, notify_export_success};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::PathBuf;

pub struct ExportLogic;

impl ExportLogic {
    /// Export one day's report.
    ///
    /// - `file`: output path (`~` expanded); `None` → `shift_report_<date>.<ext>`
    ///   in the current directory
    /// - `force`: overwrite an existing file without asking
    pub fn export(
        report: &ShiftReport,
        format: ExportFormat,
        file: Option<&str>,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = match file {
            Some(f) => expand_tilde(f),
            None => PathBuf::from(report.default_file_name(format.as_str())),
        };

        ensure_writable(&path, force)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if report.rows.is_empty() {
            warning(format!("No absences recorded on {}.", report.date));
        }

        match format {
            ExportFormat::Csv => export_csv(report, &path)?,
            ExportFormat::Json => export_json(report, &path)?,
        }

        notify_export_success(&format.as_str().to_uppercase(), &path);
        Ok(path)
    }
}
