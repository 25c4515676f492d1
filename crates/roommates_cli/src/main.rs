//! `roommates` terminal front end.
//!
//! Resolves storage and logging settings from flags or environment, then
//! hands three repositories sharing one connection provider to the menu loop.

mod shell;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use roommates_core::{
    core_version, default_log_level, init_logging, ConnectionProvider, LogLevel,
    SqliteChoreRepository, SqliteRoomRepository, SqliteRoommateRepository,
};
use shell::Shell;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "roommates", version, about = "Manage rooms, roommates and chores")]
struct CliArgs {
    /// SQLite database file; created on first use.
    #[arg(long, env = "ROOMMATES_DB", default_value = "roommates.sqlite3")]
    db: PathBuf,

    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "ROOMMATES_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error. Defaults to `debug` in debug builds, `info` otherwise.
    #[arg(long, env = "ROOMMATES_LOG_LEVEL", value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// How long one operation waits on a locked database.
    #[arg(long, env = "ROOMMATES_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    busy_timeout_ms: u64,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    if let Some(log_dir) = &args.log_dir {
        let log_dir = absolute_dir(log_dir)?;
        let level = args.log_level.unwrap_or_else(default_log_level);
        init_logging(level, &log_dir).map_err(|err| anyhow!("cannot initialize logging: {err}"))?;
    }

    let provider = ConnectionProvider::new(&args.db)
        .with_busy_timeout(Duration::from_millis(args.busy_timeout_ms));
    // Fail at startup rather than on the first menu action.
    drop(
        provider
            .connect()
            .context("database startup check failed")?,
    );
    info!(
        "event=cli_start module=cli status=ok core_version={} db={}",
        core_version(),
        args.db.display()
    );

    let shell = Shell::new(
        SqliteRoomRepository::new(provider.clone()),
        SqliteChoreRepository::new(provider.clone()),
        SqliteRoommateRepository::new(provider),
    );
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell
        .run(&mut stdin.lock(), &mut stdout.lock())
        .context("terminal I/O failed")?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot resolve current directory")?;
    Ok(cwd.join(dir))
}
