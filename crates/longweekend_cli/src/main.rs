//! Command-line front end for the long weekend planner.
//!
//! # Responsibility
//! - Drive `HolidayPlanner` over a SQLite-backed key-value store.
//! - Print holidays, recommendations and storage usage.
//!
//! # Invariants
//! - Storage notices go to stderr; command results go to stdout.
//! - Any failed command exits with a non-zero status.

use clap::{Parser, Subcommand};
use log::info;
use longweekend_core::db::open_db;
use longweekend_core::{
    core_version, default_log_level, init_logging, HolidayPlanner, SqliteKeyValueStore,
    StorageGateway,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "longweekend.sqlite3";

/// Plan long weekends around your holidays
#[derive(Parser)]
#[command(name = "longweekend")]
#[command(version)]
struct Cli {
    /// SQLite file holding the planner data
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); requires --log-dir
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List saved holidays
    List,
    /// Add a holiday
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: String,
    },
    /// Remove a holiday by id
    Remove {
        #[arg(long)]
        id: String,
    },
    /// Show long weekend recommendations
    Recommend,
    /// Show estimated storage usage
    Quota,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let log_dir = std::env::current_dir()?.join(log_dir);
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, &log_dir.to_string_lossy())?;
        info!("event=cli_start module=cli status=ok version={}", core_version());
    }

    let conn = open_db(&cli.db)?;
    let mut planner = HolidayPlanner::open(StorageGateway::new(SqliteKeyValueStore::new(&conn)));
    if let Some(notice) = planner.notice() {
        eprintln!("notice: {}", notice.user_message);
    }

    match cli.command {
        Command::List => {
            if planner.holidays().is_empty() {
                println!("No holidays saved.");
            }
            for holiday in planner.holidays() {
                println!("{}  {:<12} {}", holiday.id, holiday.date, holiday.name);
            }
        }
        Command::Add { name, date } => {
            let holiday = planner.add_holiday(&name, &date)?;
            println!("Added {} ({}) id={}", holiday.name, holiday.date, holiday.id);
        }
        Command::Remove { id } => {
            let holiday = planner.remove_holiday(&id)?;
            println!("Removed {} ({})", holiday.name, holiday.date);
        }
        Command::Recommend => {
            if planner.recommendations().is_empty() {
                println!("No long weekend opportunities found.");
            }
            for item in planner.recommendations() {
                println!(
                    "{} ({}, {}): {}",
                    item.holiday_name, item.holiday_day_of_week, item.holiday_date, item.explanation
                );
            }
        }
        Command::Quota => {
            let quota = planner.quota_info();
            match (quota.available, quota.total) {
                (Some(available), Some(total)) => println!(
                    "used={} bytes available={} bytes total={} bytes",
                    quota.used, available, total
                ),
                _ => println!("used={} bytes (store cannot be inspected)", quota.used),
            }
        }
    }

    Ok(())
}
