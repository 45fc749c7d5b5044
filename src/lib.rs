//! Product Inventory - single-user catalog manager
//!
//! Keeps a small product catalog in one JSON document: register, look up,
//! modify and delete products, adjust stock, manage categories, export CSV
//! reports and take timestamped backups of the document.

pub mod backup;
pub mod catalog;
pub mod config;
pub mod error;
pub mod formatters;
pub mod inventory;
pub mod models;
pub mod parsers;
pub mod report;
pub mod store;
pub mod utils;

// Re-export commonly used items
pub use backup::BackupManager;
pub use catalog::Catalog;
pub use config::Config;
pub use error::{InventoryError, Result};
pub use inventory::Inventory;
pub use models::{
    Confirmation, FieldRejection, ModifyOutcome, NewProduct, Product, ProductUpdate,
    StockAdjustment, LEGACY_UNCATEGORIZED, UNCATEGORIZED,
};
pub use report::Reporter;
pub use store::Store;
