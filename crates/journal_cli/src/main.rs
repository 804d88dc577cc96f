//! Interactive journal entry point.
//!
//! # Responsibility
//! - Start file logging, open the journal database and hand both terminal
//!   streams to the shell.
//! - Map fatal failures to a diagnostic on stderr and exit code 1.

mod command;
mod config;
mod console;
mod render;
mod shell;

use config::JournalConfig;
use journal_core::{init_logging, open_db, JournalService, SqliteEntryRepository};
use log::{error, info};
use shell::Shell;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = JournalConfig::default();

    // Logging is diagnostics only; the journal still works without it.
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={}", err);
            eprintln!("journal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &JournalConfig) -> Result<(), Box<dyn Error>> {
    info!(
        "event=cli_start module=cli status=start core_version={} db_path={}",
        journal_core::core_version(),
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;
    let service = JournalService::new(SqliteEntryRepository::new(&conn));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(service, stdin.lock(), stdout.lock());
    shell.run()?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}
