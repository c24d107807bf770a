//! Disk persistence for flat records.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::record::Record;

/// Errors from reading or writing a persisted record.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The file exists but could not be read or written.
    #[error("cache I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but does not hold a usable record.
    #[error("corrupt cache record {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },
}

/// A single flat JSON record on disk.
///
/// Writes overwrite the file in place; there is no temp-file rename, so a
/// crash mid-write can leave a truncated record behind. Such a record reads
/// back as [`CacheError::Corrupt`].
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the record file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted record.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn load(&self) -> Result<Option<Record>, CacheError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let record: Record = serde_json::from_str(&contents).map_err(|e| CacheError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        Ok(Some(record))
    }

    /// Overwrite the persisted record.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, record: &Record) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(record).map_err(|e| CacheError::Corrupt {
            path: self.path.clone(),
            message: format!("failed to serialize record: {e}"),
        })?;

        std::fs::write(&self.path, json).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
