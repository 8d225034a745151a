use super::Storage;
use crate::error::{Result, TodosError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// What [`FileStorage::read`] returns when the file has never been written.
pub const EMPTY_COLLECTION: &str = "[]";

pub struct FileStorage {
    file_path: PathBuf,
}

impl FileStorage {
    /// Creates `base_dir` (recursively) if it is missing.
    pub fn new(base_dir: impl AsRef<Path>, filename: &str) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        info!(base_dir = %base_dir.display(), filename, "opening file storage");

        if !base_dir.exists() {
            fs::create_dir_all(base_dir)
                .map_err(|e| TodosError::io("Failed to create directory", base_dir, e))?;
        }

        Ok(Self {
            file_path: base_dir.join(filename),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn dir(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new("."))
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<String> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "no data file yet");
            return Ok(EMPTY_COLLECTION.to_string());
        }
        fs::read_to_string(&self.file_path)
            .map_err(|e| TodosError::io("Failed to read from", &self.file_path, e))
    }

    fn write(&mut self, data: &str) -> Result<()> {
        // Atomic write: a crash mid-write leaves the previous file intact.
        let tmp_path = self.dir().join(format!(".todos-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, data)
            .map_err(|e| TodosError::io("Failed to write to", &tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.file_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(TodosError::io("Failed to write to", &self.file_path, e));
        }
        debug!(path = %self.file_path.display(), bytes = data.len(), "wrote data file");
        Ok(())
    }
}
