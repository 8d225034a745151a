use crate::error::{Result, TodosError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILENAME: &str = "todos.yaml";
const DEFAULT_LOG_LEVEL: &str = "error";

/// Configuration for todoz, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodozConfig {
    /// Name of the data file inside the data directory
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Where `todoz.log` goes. Defaults to `<data dir>/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for TodozConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            log_dir: None,
            log_level: default_log_level(),
        }
    }
}

impl TodozConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| TodosError::io("Failed to read from", &config_path, e))?;
        let config: TodozConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .map_err(|e| TodosError::io("Failed to create directory", config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)
            .map_err(|e| TodosError::io("Failed to write to", &config_path, e))?;
        Ok(())
    }

    pub fn log_dir(&self, data_dir: &Path) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("logs"))
    }
}
