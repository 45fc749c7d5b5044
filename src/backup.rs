use crate::error::Result;
use crate::store::Store;
use crate::utils::file_stamp;
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_PREFIX: &str = "products_backup_";

/// Timestamped byte copies of the persisted document.
///
/// Two backups within the same second share a name; the later one wins.
#[derive(Debug, Clone)]
pub struct BackupManager {
    dir: PathBuf,
}

impl BackupManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy the document behind `store` into the backup directory.
    ///
    /// The caller must have saved the current state first; see
    /// [`crate::inventory::Inventory::backup`].
    pub fn backup(&self, store: &Store) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let dest = self
            .dir
            .join(format!("{BACKUP_PREFIX}{}.json", file_stamp()));
        let bytes = fs::copy(store.path(), &dest)?;
        log::info!(
            "Backup of {} ({} bytes) written to {}",
            store.path().display(),
            bytes,
            dest.display()
        );
        Ok(dest)
    }

    /// Existing backups, oldest first
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_backup = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(BACKUP_PREFIX) && n.ends_with(".json"))
                .unwrap_or(false);
            if is_backup && path.is_file() {
                backups.push(path);
            }
        }
        backups.sort();
        Ok(backups)
    }
}
