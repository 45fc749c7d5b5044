//! The catalog paired with its store.
//!
//! Every successful mutation is written back to the document once. An
//! operation that fails, including on save, leaves the in-memory catalog as it
//! was. Reads go through [`Inventory::catalog`].

use crate::backup::BackupManager;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{
    Confirmation, ModifyOutcome, NewProduct, Product, ProductUpdate, StockAdjustment,
};
use crate::report::Reporter;
use crate::store::Store;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Inventory {
    catalog: Catalog,
    store: Store,
}

impl Inventory {
    /// Load the catalog from `store` (empty if missing or malformed)
    pub fn open(store: Store) -> Self {
        let catalog = store.load();
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Write the current state to the document
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.catalog)
    }

    /// Run `op` on a copy of the catalog and keep the copy only once it has
    /// been saved. `persist` decides from the result whether a save is needed.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Catalog) -> Result<T>,
        persist: impl FnOnce(&T) -> bool,
    ) -> Result<T> {
        let mut next = self.catalog.clone();
        let value = op(&mut next)?;
        if persist(&value) {
            self.store.save(&next)?;
        }
        self.catalog = next;
        Ok(value)
    }

    pub fn register(&mut self, new: NewProduct) -> Result<Product> {
        self.commit(|c| c.register(new).cloned(), |_| true)
    }

    pub fn modify(&mut self, code: &str, update: ProductUpdate) -> Result<ModifyOutcome> {
        self.commit(|c| c.modify(code, update), ModifyOutcome::needs_save)
    }

    pub fn delete(&mut self, code: &str, confirmation: Confirmation) -> Result<Option<Product>> {
        self.commit(|c| c.delete(code, confirmation), Option::is_some)
    }

    pub fn adjust_stock(&mut self, code: &str, adjustment: StockAdjustment) -> Result<u32> {
        self.commit(|c| c.adjust_stock(code, adjustment), |_| true)
    }

    pub fn create_category(&mut self, name: &str) -> Result<()> {
        self.commit(|c| c.create_category(name), |_| true)
    }

    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<usize> {
        self.commit(|c| c.rename_category(old, new), |_| true)
    }

    pub fn delete_category(&mut self, name: &str) -> Result<usize> {
        self.commit(|c| c.delete_category(name), |_| true)
    }

    pub fn generate_report(&self, reporter: &Reporter) -> Result<PathBuf> {
        reporter.generate(&self.catalog)
    }

    /// Flush the in-memory state, then archive the document
    pub fn backup(&self, backups: &BackupManager) -> Result<PathBuf> {
        self.save()?;
        backups.backup(&self.store)
    }
}
