use crate::backup::BackupManager;
use crate::error::Result;
use crate::report::Reporter;
use crate::store::Store;
use std::path::{Path, PathBuf};

/// File locations for the document, backups and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub backup_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl Default for Config {
    /// Everything under `~/.local/share/product_inventory/` (or the platform
    /// equivalent), falling back to the working directory.
    fn default() -> Self {
        Self::in_dir(default_data_dir())
    }
}

/// Returns the default data directory: ~/.local/share/product_inventory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("product_inventory")
}

impl Config {
    /// Root all paths under `base`: `products.json`, `backups/`, `reports/`
    pub fn in_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            data_file: base.join("products.json"),
            backup_dir: base.join("backups"),
            report_dir: base.join("reports"),
        }
    }

    /// Create the document's parent directory and the backup/report directories
    pub fn ensure_dirs(&self) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                log::info!("Created directory: {}", parent.display());
            }
        }
        for dir in [&self.backup_dir, &self.report_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
                log::info!("Created directory: {}", dir.display());
            }
        }
        Ok(())
    }

    pub fn store(&self) -> Store {
        Store::new(&self.data_file)
    }

    pub fn reporter(&self) -> Reporter {
        Reporter::new(&self.report_dir)
    }

    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(&self.backup_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_layout() {
        let config = Config::in_dir("/tmp/shop");
        assert_eq!(config.data_file, PathBuf::from("/tmp/shop/products.json"));
        assert_eq!(config.backup_dir, PathBuf::from("/tmp/shop/backups"));
        assert_eq!(config.report_dir, PathBuf::from("/tmp/shop/reports"));
    }

    #[test]
    fn ensure_dirs_creates_everything() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::in_dir(tmp.path().join("nested"));
        config.ensure_dirs().unwrap();
        assert!(config.data_file.parent().unwrap().is_dir());
        assert!(config.backup_dir.is_dir());
        assert!(config.report_dir.is_dir());
        assert!(!config.data_file.exists());
    }
}
