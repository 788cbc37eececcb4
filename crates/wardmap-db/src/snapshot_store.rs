//! Load and save the status snapshot as a JSON file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;
use wardmap_types::{DistrictId, StatusRecord};

use crate::error::DbError;

/// Reads and writes the durable status snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Bind a snapshot store to a filesystem path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the durable snapshot, if one is usable.
    ///
    /// Returns `Ok(None)` when the file does not exist or does not parse
    /// as a snapshot document -- a corrupt copy is logged and treated the
    /// same as an absent one, so it can neither crash startup nor
    /// partially populate the store. The caller is responsible for
    /// materializing the all-`normal` default in that case.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Io`] for filesystem failures other than the
    /// file being absent.
    pub async fn load(&self) -> Result<Option<BTreeMap<DistrictId, StatusRecord>>, DbError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DbError::Io(e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "durable snapshot is unreadable, treating as absent"
                );
                Ok(None)
            }
        }
    }

    /// Write the full snapshot durably.
    ///
    /// Pretty-printed JSON, whole-file overwrite; the parent directory is
    /// created on demand. Best-effort: the caller logs a failure and
    /// keeps the in-memory mutation.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if the snapshot cannot be
    /// encoded, or [`DbError::Io`] if the write fails.
    pub async fn save(
        &self,
        snapshot: &BTreeMap<DistrictId, StatusRecord>,
    ) -> Result<(), DbError> {
        let json = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
