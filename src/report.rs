//! CSV report export.
//!
//! One file per call, named after the current time. An existing report is
//! never overwritten: the file is opened create-new and a numeric suffix is
//! appended when the name is already taken within the same second.

use crate::catalog::Catalog;
use crate::error::{InventoryError, Result};
use crate::models::Product;
use crate::utils::{file_stamp, format_optional_timestamp, format_timestamp};
use csv::WriterBuilder;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Header row, in column order
pub const REPORT_HEADER: [&str; 8] = [
    "code",
    "name",
    "category",
    "quantity",
    "price",
    "description",
    "created_at",
    "modified_at",
];

const REPORT_PREFIX: &str = "products_report_";

#[derive(Debug, Clone)]
pub struct Reporter {
    dir: PathBuf,
}

impl Reporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write every product of `catalog` to a new CSV file and return its path.
    ///
    /// Fails with [`InventoryError::NothingToExport`] and creates no file when
    /// the catalog is empty.
    pub fn generate(&self, catalog: &Catalog) -> Result<PathBuf> {
        if catalog.is_empty() {
            log::warn!("Report requested for an empty catalog");
            return Err(InventoryError::NothingToExport);
        }

        fs::create_dir_all(&self.dir)?;
        let (path, file) = self.create_report_file(&file_stamp())?;

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        wtr.write_record(REPORT_HEADER)?;
        for product in catalog.products() {
            wtr.write_record(report_row(product))?;
        }
        wtr.flush()?;

        log::info!(
            "Report with {} products written to {}",
            catalog.len(),
            path.display()
        );
        Ok(path)
    }

    /// Opens `products_report_<stamp>.csv`, or `..._<stamp>_<n>.csv` for the
    /// first free `n` when that name is taken.
    fn create_report_file(&self, stamp: &str) -> Result<(PathBuf, File)> {
        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("{REPORT_PREFIX}{stamp}.csv")
            } else {
                format!("{REPORT_PREFIX}{stamp}_{attempt}.csv")
            };
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// One CSV row for `product`, price fixed to two decimals
pub fn report_row(product: &Product) -> [String; 8] {
    [
        product.code.clone(),
        product.name.clone(),
        product.category.clone(),
        product.quantity.to_string(),
        format!("{:.2}", product.price),
        product.description.clone(),
        format_timestamp(&product.created_at),
        format_optional_timestamp(product.modified_at.as_ref()),
    ]
}
