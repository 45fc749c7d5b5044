//! Field parsing utilities.
//!
//! Pure functions that turn user-typed text into validated values. Every
//! failure is an [`InventoryError::Validation`] naming the field.

use crate::error::{InventoryError, Result};
use log::{debug, warn};

/// Trims `text` and rejects it if nothing is left.
pub fn parse_non_empty(field: &'static str, text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        warn!("Empty value for required field '{field}'");
        return Err(InventoryError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Parses a non-negative whole number.
///
/// # Arguments
/// * `text` - A string like "10" or " 3 "
pub fn parse_quantity(text: &str) -> Result<u32> {
    debug!("Parsing quantity: '{text}'");
    let value: i64 = text.trim().parse().map_err(|_| {
        warn!("Failed to parse quantity '{text}'");
        InventoryError::validation("quantity", format!("'{}' is not a whole number", text.trim()))
    })?;

    if value < 0 {
        return Err(InventoryError::validation(
            "quantity",
            format!("{value} is negative"),
        ));
    }

    u32::try_from(value)
        .map_err(|_| InventoryError::validation("quantity", format!("{value} is too large")))
}

/// Parses a price, handling both comma and dot decimal separators.
///
/// # Arguments
/// * `text` - A price like "45.50" or "45,50"
pub fn parse_price(text: &str) -> Result<f64> {
    debug!("Parsing price: '{text}'");
    let clean = text.trim().replace(',', ".");
    let value: f64 = clean.parse().map_err(|_| {
        warn!("Failed to parse price '{text}'");
        InventoryError::validation("price", format!("'{}' is not a number", text.trim()))
    })?;
    validate_price(value)
}

/// Rejects negative, NaN and infinite prices.
pub fn validate_price(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(InventoryError::validation("price", "must be a finite number"));
    }
    if value < 0.0 {
        return Err(InventoryError::validation(
            "price",
            format!("{value} is negative"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "parsers_tests.rs"]
mod tests;
