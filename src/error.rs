//! Error types for product_inventory

use thiserror::Error;

/// Unified error type for catalog, persistence, report and backup operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Malformed or out-of-range input, or an empty required field
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A product with this code (case-insensitive) already exists
    #[error("A product with code '{0}' already exists")]
    DuplicateCode(String),

    /// The category name is already in the category set
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    /// No product matches the code
    #[error("No product with code '{0}'")]
    ProductNotFound(String),

    /// The category name is not in the category set
    #[error("Category '{0}' does not exist")]
    CategoryNotFound(String),

    /// Decrement larger than the quantity on hand
    #[error("Cannot remove {requested} units of '{code}': only {available} in stock")]
    InsufficientStock {
        code: String,
        requested: u32,
        available: u32,
    },

    /// Report requested for an empty catalog
    #[error("Nothing to export: the catalog has no products")]
    NothingToExport,

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write a report row
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl InventoryError {
    /// Shorthand for a [`InventoryError::Validation`] error
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        InventoryError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for product_inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
