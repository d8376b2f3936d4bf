use crate::cli::commands::{resolve_date, with_view};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ShiftReport;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        date,
        force,
    } = cmd
    {
        let day = resolve_date(date.as_ref(), now)?;

        let report = with_view(cfg, now, |store| {
            Ok(ShiftReport::build(
                day,
                store.workers(),
                &store.logs_for_date(day),
            ))
        })?;

        ExportLogic::export(&report, *format, file.as_deref(), *force)?;
    }
    Ok(())
}
