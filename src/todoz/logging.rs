//! File logging for the binary. The library itself only emits `tracing`
//! events; nothing is recorded unless a subscriber is installed here.

use crate::error::{Result, TodosError};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::Level;

pub const LOG_FILENAME: &str = "todoz.log";

/// Unknown level names fall back to `error`.
pub fn parse_level(level: &str) -> LevelFilter {
    if level.trim().eq_ignore_ascii_case("off") {
        return LevelFilter::OFF;
    }
    level
        .trim()
        .parse::<Level>()
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::ERROR)
}

/// Appends log lines to `<log_dir>/todoz.log`, creating the directory if
/// needed. A second call in the same process is a no-op.
pub fn init(log_dir: &Path, level: LevelFilter) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .map_err(|e| TodosError::io("Failed to create directory", log_dir, e))?;
    }
    let log_path = log_dir.join(LOG_FILENAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| TodosError::io("Failed to open", &log_path, e))?;

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(log_dir = %log_dir.display(), %level, "logging started");
    }
    Ok(())
}
