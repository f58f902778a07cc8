//! Persistence for the weekly secret record.
//!
//! Exactly one record exists at a time: the secret for some week. Rotation
//! replaces it wholesale; there is no history.
//!
//! # Atomic Writes
//!
//! The file-backed store writes atomically using a write-to-temp-then-rename
//! pattern:
//! 1. Write to `<path>.tmp`
//! 2. fsync the file
//! 3. Rename to `<path>`
//! 4. fsync the parent directory
//!
//! Readers therefore always see either the old or the new record, never a
//! partial write.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::week::WeekId;

/// Errors that can occur reading or writing the secret record.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for secret store operations.
pub type Result<T> = std::result::Result<T, SecretStoreError>;

/// The persisted secret record.
///
/// Stored as `{"week": "YYYY-Www", "secret": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSecret {
    /// The week this secret is valid for.
    pub week: WeekId,

    /// The secret value distributed to approvers.
    pub secret: String,
}

/// Storage backend for the secret record.
///
/// Implementations hold at most one record. `load` returns `Ok(None)` when no
/// record has been saved yet; unreadable or malformed records are errors, and
/// the caller decides whether to regenerate.
pub trait SecretStore: Send {
    fn load(&self) -> Result<Option<StoredSecret>>;
    fn save(&mut self, record: &StoredSecret) -> Result<()>;
}

/// Secret record stored as a JSON file on local disk.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSecretStore { path: path.into() }
    }

    /// Returns the path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretStore for FileSecretStore {
    fn load(&self) -> Result<Option<StoredSecret>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SecretStoreError::Io(e)),
        };

        let record: StoredSecret = serde_json::from_slice(&bytes)?;
        Ok(Some(record))
    }

    fn save(&mut self, record: &StoredSecret) -> Result<()> {
        use std::io::Write;

        let dir = parent_dir(&self.path);
        std::fs::create_dir_all(dir)?;

        // Write to temp file
        let tmp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(record)?;

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;
            file.write_all(&bytes)?;
            fsync_file(&file)?;
        }

        // Atomic rename
        std::fs::rename(&tmp_path, &self.path)?;

        // fsync directory to ensure rename is durable
        fsync_dir(dir)?;

        Ok(())
    }
}

/// In-memory secret record for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    record: Option<StoredSecret>,
}

impl SecretStore for MemorySecretStore {
    fn load(&self) -> Result<Option<StoredSecret>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &StoredSecret) -> Result<()> {
        self.record = Some(record.clone());
        Ok(())
    }
}

/// The directory containing `path`, with a bare filename resolving to `.`.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Syncs a file's contents and metadata to disk (`fsync(2)`).
fn fsync_file(file: &File) -> io::Result<()> {
    file.sync_all()
}

/// Syncs a directory to disk, ensuring directory entries are durable.
///
/// Without this, a renamed file may revert to its old name after a power
/// loss even though its contents were synced.
fn fsync_dir(dir_path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(dir_path)?;
    dir.sync_all()
}
