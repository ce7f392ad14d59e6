//! Magazine summary probe.
//!
//! # Responsibility
//! - Open a quill database file and print one magazine summary as JSON.
//! - Keep output deterministic for quick local sanity checks.

use clap::Parser;
use quill_core::{default_log_level, init_logging, PublishingService, SqliteFileProvider};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "quill_cli")]
#[command(about = "Print a magazine summary from a quill database", long_about = None)]
struct Cli {
    /// SQLite database file; created and bootstrapped when missing
    db_path: PathBuf,

    /// Id of the magazine to summarize
    magazine_id: i64,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "QUILL_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long, env = "QUILL_LOG_LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let magazine_id = cli.magazine_id;
    let service = PublishingService::new(SqliteFileProvider::new(cli.db_path));
    match service.magazine_summary(magazine_id) {
        Ok(Some(summary)) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("failed to encode summary: {err}");
                ExitCode::FAILURE
            }
        },
        Ok(None) => {
            eprintln!("magazine {magazine_id} not found");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("event=cli_summary module=cli status=error magazine_id={magazine_id}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
