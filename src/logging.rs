use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "quizr.log";
pub const LOG_ENV: &str = "QUIZR_LOG";

/// Open `<data dir>/quizr.log` for appending, creating the directory.
pub fn open_log_file(data_dir: &Path) -> Result<File> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("cannot create data dir {}", data_dir.display()))?;
    let log_path = data_dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))
}

/// Log to `<data dir>/quizr.log`; the terminal belongs to the UI.
/// Verbosity comes from `QUIZR_LOG` and defaults to warnings.
pub fn init(data_dir: &Path) -> Result<()> {
    let file = open_log_file(data_dir)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))
}
