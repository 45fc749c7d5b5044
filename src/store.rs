use crate::catalog::Catalog;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Whole-document JSON persistence for the catalog.
///
/// The document is always read and written as one unit.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the catalog from disk.
    ///
    /// A missing, unreadable or malformed document yields an empty catalog, as
    /// does one whose products break the catalog rules (see
    /// [`Catalog::validate`]). Products on the legacy sentinel category are
    /// moved to the current one.
    /// The failure is logged but not returned to the caller.
    pub fn load(&self) -> Catalog {
        if !self.exists() {
            log::info!(
                "No catalog document at {}, starting empty",
                self.path.display()
            );
            return Catalog::default();
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Catalog>(&content) {
                Ok(mut catalog) => {
                    if let Err(e) = catalog.validate() {
                        log::warn!(
                            "Invalid catalog in {}, starting with an empty catalog: {}",
                            self.path.display(),
                            e
                        );
                        return Catalog::default();
                    }
                    catalog.adopt_legacy_sentinel();
                    log::info!(
                        "Loaded catalog with {} products and {} categories",
                        catalog.len(),
                        catalog.categories().len()
                    );
                    return catalog;
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse {}, starting with an empty catalog: {}",
                        self.path.display(),
                        e
                    );
                }
            },
            Err(e) => {
                log::warn!(
                    "Failed to read {}, starting with an empty catalog: {}",
                    self.path.display(),
                    e
                );
            }
        }
        Catalog::default()
    }

    /// Save the catalog, replacing the previous document.
    ///
    /// The JSON is written to a sibling temporary file first and then renamed
    /// over the document, so readers never observe a half-written file.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut content = serde_json::to_string_pretty(catalog)?;
        content.push('\n');

        let tmp = self.temp_path();
        fs::write(&tmp, content)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        log::debug!(
            "Saved catalog with {} products to {}",
            catalog.len(),
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
