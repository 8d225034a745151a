use crate::api::TodosApi;
use crate::config::TodozConfig;
use crate::error::{Result, TodosError};
use crate::logging;
use crate::store::fs::FileStorage;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Overrides the data directory, primarily for testing.
pub const DATA_DIR_ENV: &str = "TODOZ_DATA";
/// Overrides the configured log level.
pub const LOG_LEVEL_ENV: &str = "TODOZ_LOG_LEVEL";

/// Values the front end may force, taking priority over env and config.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// The wired API, ready for a front end. Logging is installed by then.
pub struct TodozContext {
    pub api: TodosApi<FileStorage>,
}

/// Resolves the data directory:
/// 1. `--base-dir`
/// 2. `TODOZ_DATA`
/// 3. the OS data directory for todoz
pub fn resolve_data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = base_dir {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "todoz", "todoz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TodosError::Store("Could not determine a data directory".to_string()))
}

fn resolve_level(config: &TodozConfig, verbose: bool) -> LevelFilter {
    if verbose {
        return LevelFilter::DEBUG;
    }
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(level) => logging::parse_level(&level),
        Err(_) => logging::parse_level(&config.log_level),
    }
}

pub fn initialize(overrides: Overrides) -> Result<TodozContext> {
    let data_dir = resolve_data_dir(overrides.base_dir)?;
    let config = TodozConfig::load(&data_dir)?;

    let log_dir = overrides
        .log_dir
        .unwrap_or_else(|| config.log_dir(&data_dir));
    logging::init(&log_dir, resolve_level(&config, overrides.verbose))?;

    let storage = FileStorage::new(&data_dir, &config.filename)?;
    Ok(TodozContext {
        api: TodosApi::new(storage),
    })
}
