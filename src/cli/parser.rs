use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftguard
#[derive(Parser)]
#[command(
    name = "shiftguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track who is away from their workstation and for how long, using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend the current time is this local instant (YYYY-MM-DD HH:MM[:SS])
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a worker to the roster
    Register {
        #[arg(long, help = "Display name")]
        name: String,

        #[arg(long = "pc", help = "Assigned terminal, e.g. PC-67")]
        pc_number: String,

        #[arg(long, help = "Team: A, B, C or D (default from config)")]
        team: Option<String>,
    },

    /// Flip a worker between Active and Away
    Toggle {
        /// Worker id, e.g. worker-12
        #[arg(required_unless_present = "pc")]
        id: Option<String>,

        #[arg(long, conflicts_with = "id", help = "Select the worker by PC number")]
        pc: Option<String>,
    },

    /// List workers with their live status
    Roster {
        #[arg(long, help = "Only this team (A-D, or 'all')")]
        team: Option<String>,

        #[arg(long, short, help = "Case-insensitive match on name or PC number")]
        search: Option<String>,

        #[arg(long, help = "Only workers currently away")]
        away: bool,
    },

    /// Show totals, team breakdown and overdue absences
    Dashboard {
        #[arg(long, default_value_t = 10, help = "How many recent absences to show")]
        recent: usize,
    },

    /// Show the absence report for one day
    Report {
        #[arg(long, help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,
    },

    /// Export the absence report for one day
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(
            long,
            value_name = "FILE",
            help = "Output file (default shift_report_<date>.<ext>)"
        )]
        file: Option<String>,

        #[arg(long, help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite without asking")]
        force: bool,
    },
}
