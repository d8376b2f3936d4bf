use crate::cli::commands::{resolve_date, with_view};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ShiftReport;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET};
use crate::utils::table::Table;
use crate::utils::time::format_duration;
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Report { date } = cmd {
        let day = resolve_date(date.as_ref(), now)?;

        let report = with_view(cfg, now, |store| {
            Ok(ShiftReport::build(
                day,
                store.workers(),
                &store.logs_for_date(day),
            ))
        })?;

        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ShiftReport) {
    header(format!("Shift report for {}", report.date));

    println!("{CYAN}•{RESET} Total absences: {}", report.total_absences);
    println!(
        "{CYAN}•{RESET} Total duration: {} seconds ({})",
        report.total_duration,
        format_duration(report.total_duration)
    );
    println!("{CYAN}•{RESET} Active workers: {}", report.active_workers);
    println!();

    if report.rows.is_empty() {
        println!("No shift logs recorded for this date.");
        return;
    }

    let mut table = Table::new(["PC", "Name", "Team", "Start", "End", "Duration"]);
    for r in &report.rows {
        table.add_row(vec![
            r.pc_number.clone().unwrap_or_else(|| "--".into()),
            r.worker_name
                .clone()
                .unwrap_or_else(|| r.worker_id.to_string()),
            r.team.map(|t| t.code().to_string()).unwrap_or_else(|| "--".into()),
            r.start_time.format("%H:%M:%S").to_string(),
            r.end_time.format("%H:%M:%S").to_string(),
            format_duration(r.duration),
        ]);
    }
    print!("{}", table.render());
}
