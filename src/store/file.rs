// Cloud-storage file backend
//
// Steam keeps the catalog as one JSON array in
// userdata/<account>/config/cloudstorage/cloud-storage-namespace-1.json.
// A commit backs up the previous file next to it, then replaces it whole.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, TextEncoding, decode, decode_lenient, encode};
use crate::error::StoreError;
use crate::observer::SyncObserver;

/// What to do with the previous catalog file before overwriting it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupPolicy {
    /// A failed backup aborts the commit
    #[default]
    Required,
    /// A failed backup is logged and the commit goes ahead
    BestEffort,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    backup: BackupPolicy,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>, backup: BackupPolicy) -> Self {
        Self {
            path: path.into(),
            backup,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn probe(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Catalog, StoreError> {
        Ok(decode(&self.read()?, TextEncoding::Utf8)?)
    }

    /// Load for display, skipping malformed elements
    pub fn load_lenient(&self, observer: &dyn SyncObserver) -> Result<Catalog, StoreError> {
        Ok(decode_lenient(&self.read()?, TextEncoding::Utf8, observer)?)
    }

    fn read(&self) -> Result<Vec<u8>, StoreError> {
        let bytes = std::fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "loaded catalog file");
        Ok(bytes)
    }

    pub fn commit(&self, catalog: &Catalog) -> Result<(), StoreError> {
        self.commit_at(catalog, Local::now())
    }

    /// [`commit`](Self::commit) naming any backup after `time`
    pub fn commit_at(&self, catalog: &Catalog, time: DateTime<Local>) -> Result<(), StoreError> {
        let bytes = encode(catalog, TextEncoding::Utf8)?;
        self.backup_previous(time)?;
        replace_file(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "committed catalog file");
        Ok(())
    }

    fn backup_previous(&self, time: DateTime<Local>) -> Result<(), StoreError> {
        if self.backup == BackupPolicy::Disabled || !self.path.exists() {
            return Ok(());
        }

        let backup = backup_path(&self.path, time);
        match std::fs::copy(&self.path, &backup) {
            Ok(_) => {
                tracing::info!(backup = %backup.display(), "backed up catalog file");
                Ok(())
            }
            Err(source) if self.backup == BackupPolicy::BestEffort => {
                tracing::warn!(
                    backup = %backup.display(),
                    error = %source,
                    "catalog backup failed, continuing"
                );
                Ok(())
            }
            Err(source) => Err(StoreError::Backup {
                path: backup,
                source,
            }),
        }
    }
}

/// Sibling path `<file name>.backup-<YYYYMMDD_HHMMSS_fff>`
pub fn backup_path(path: &Path, time: DateTime<Local>) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "catalog".to_string());
    path.with_file_name(format!("{}.backup-{}", name, time.format("%Y%m%d_%H%M%S_%3f")))
}

/// Write through a temporary sibling so a failed write leaves the old file intact
fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let write_error = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    if let Err(source) = std::fs::write(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, path)) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_error(source));
    }
    Ok(())
}
