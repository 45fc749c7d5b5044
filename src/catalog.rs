//! In-memory catalog: the product list plus the set of known category names.
//!
//! - Product codes are unique under case-insensitive comparison; checked on register.
//! - Quantity and price never go negative; a rejected change keeps the prior value.
//! - An operation that returns an error leaves the catalog untouched.
//! - Category membership is exact (case-sensitive); `find_by_category` is not.
//!
//! Nothing here touches the filesystem. [`crate::inventory::Inventory`] pairs a
//! catalog with a [`crate::store::Store`] and persists after each mutation.

use crate::error::{InventoryError, Result};
use crate::models::{
    Confirmation, FieldRejection, ModifyOutcome, NewProduct, Product, ProductUpdate,
    StockAdjustment, LEGACY_UNCATEGORIZED, UNCATEGORIZED,
};
use crate::parsers::{parse_non_empty, parse_price, parse_quantity, validate_price};
use crate::utils::now;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The whole catalog document: products in display order and category names
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(alias = "productos", default)]
    products: Vec<Product>,
    #[serde(alias = "categorias", default)]
    categories: Vec<String>,
}

/// Returns the trimmed text, or `None` when the user left it blank.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn rejection(field: &'static str, err: InventoryError) -> FieldRejection {
    let reason = match err {
        InventoryError::Validation { reason, .. } => reason,
        other => other.to_string(),
    };
    log::warn!("Rejected {field}: {reason}");
    FieldRejection { field, reason }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Known category names in insertion order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Exact membership test on the category set
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.products.iter().position(|p| p.has_code(code))
    }

    fn position_or_not_found(&self, code: &str) -> Result<usize> {
        self.position(code)
            .ok_or_else(|| InventoryError::ProductNotFound(code.trim().to_string()))
    }

    /// Adds `name` to the category set if missing. Returns true when added.
    fn ensure_category(&mut self, name: &str) -> bool {
        if self.has_category(name) {
            return false;
        }
        log::debug!("Adding category '{name}'");
        self.categories.push(name.to_string());
        true
    }

    // ---- lookup ----

    /// Case-insensitive exact match on the product code
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.position(code).map(|i| &self.products[i])
    }

    /// Case-insensitive substring match on the product name, in catalog order
    pub fn find_by_name_substring(&self, text: &str) -> Vec<&Product> {
        let needle = text.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive exact match on the category name, in catalog order
    pub fn find_by_category(&self, name: &str) -> Vec<&Product> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .collect()
    }

    // ---- products ----

    /// Appends a new product.
    ///
    /// Fails with [`InventoryError::DuplicateCode`] when the code is already
    /// taken (case-insensitive); nothing is added in that case.
    pub fn register(&mut self, new: NewProduct) -> Result<&Product> {
        let code = parse_non_empty("code", &new.code)?;
        if self.position(&code).is_some() {
            return Err(InventoryError::DuplicateCode(code));
        }
        let name = parse_non_empty("name", &new.name)?;
        let price = validate_price(new.price)?;
        let category = supplied(&new.category).unwrap_or(UNCATEGORIZED).to_string();
        let description = supplied(&new.description).unwrap_or_default().to_string();

        self.ensure_category(&category);
        log::info!("Registered product '{code}' ({name})");
        self.products.push(Product {
            code,
            name,
            category,
            quantity: new.quantity,
            price,
            description,
            created_at: now(),
            modified_at: None,
        });
        Ok(&self.products[self.products.len() - 1])
    }

    /// Applies a partial update to the product with `code`.
    ///
    /// Blank fields are left alone. An unparsable or negative quantity/price is
    /// reported in [`ModifyOutcome::rejected`] while the other fields still
    /// apply. `modified_at` is stamped only when something actually changed.
    pub fn modify(&mut self, code: &str, update: ProductUpdate) -> Result<ModifyOutcome> {
        let idx = self.position_or_not_found(code)?;
        let mut outcome = ModifyOutcome::default();

        if let Some(category) = supplied(&update.category) {
            outcome.category_added = self.ensure_category(category);
        }

        let product = &mut self.products[idx];

        if let Some(name) = supplied(&update.name) {
            if product.name != name {
                product.name = name.to_string();
                outcome.changed.push("name");
            }
        }
        if let Some(category) = supplied(&update.category) {
            if product.category != category {
                product.category = category.to_string();
                outcome.changed.push("category");
            }
        }
        if let Some(text) = supplied(&update.quantity) {
            match parse_quantity(text) {
                Ok(quantity) if quantity != product.quantity => {
                    product.quantity = quantity;
                    outcome.changed.push("quantity");
                }
                Ok(_) => {}
                Err(e) => outcome.rejected.push(rejection("quantity", e)),
            }
        }
        if let Some(text) = supplied(&update.price) {
            match parse_price(text) {
                Ok(price) if price != product.price => {
                    product.price = price;
                    outcome.changed.push("price");
                }
                Ok(_) => {}
                Err(e) => outcome.rejected.push(rejection("price", e)),
            }
        }
        if let Some(description) = supplied(&update.description) {
            if product.description != description {
                product.description = description.to_string();
                outcome.changed.push("description");
            }
        }

        if outcome.is_changed() {
            product.touch();
            log::info!(
                "Modified product '{}': {}",
                product.code,
                outcome.changed.join(", ")
            );
        }
        Ok(outcome)
    }

    /// Removes the product with `code` when the caller confirmed.
    ///
    /// Returns `Ok(None)` on a declined confirmation, leaving the catalog as is.
    pub fn delete(&mut self, code: &str, confirmation: Confirmation) -> Result<Option<Product>> {
        let idx = self.position_or_not_found(code)?;
        if !confirmation.is_confirmed() {
            log::info!("Deletion of '{}' cancelled", self.products[idx].code);
            return Ok(None);
        }
        let removed = self.products.remove(idx);
        log::info!("Deleted product '{}'", removed.code);
        Ok(Some(removed))
    }

    /// Sets, increments or decrements the quantity on hand. Returns the new
    /// quantity.
    pub fn adjust_stock(&mut self, code: &str, adjustment: StockAdjustment) -> Result<u32> {
        let idx = self.position_or_not_found(code)?;
        let product = &mut self.products[idx];

        let quantity = match adjustment {
            StockAdjustment::Set(n) => n,
            StockAdjustment::Increment(n) => product.quantity.checked_add(n).ok_or_else(|| {
                InventoryError::validation("quantity", format!("adding {n} overflows the stock"))
            })?,
            StockAdjustment::Decrement(n) => {
                if n > product.quantity {
                    return Err(InventoryError::InsufficientStock {
                        code: product.code.clone(),
                        requested: n,
                        available: product.quantity,
                    });
                }
                product.quantity - n
            }
        };

        log::info!(
            "Stock of '{}': {} -> {}",
            product.code,
            product.quantity,
            quantity
        );
        product.quantity = quantity;
        product.touch();
        Ok(quantity)
    }

    // ---- categories ----

    /// Adds a category name to the set.
    pub fn create_category(&mut self, name: &str) -> Result<()> {
        let name = parse_non_empty("category", name)?;
        if self.has_category(&name) {
            return Err(InventoryError::DuplicateCategory(name));
        }
        self.ensure_category(&name);
        log::info!("Created category '{name}'");
        Ok(())
    }

    /// Renames `old` to `new` in place and moves every product in `old` to
    /// `new`. Returns the number of products updated.
    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<usize> {
        let old = old.trim();
        let slot = self
            .categories
            .iter()
            .position(|c| c == old)
            .ok_or_else(|| InventoryError::CategoryNotFound(old.to_string()))?;
        let new = parse_non_empty("category", new)?;
        if self.has_category(&new) {
            return Err(InventoryError::DuplicateCategory(new));
        }

        self.categories[slot] = new.clone();
        let mut updated = 0;
        for product in self.products.iter_mut().filter(|p| p.category == old) {
            product.category = new.clone();
            product.touch();
            updated += 1;
        }
        log::info!("Renamed category '{old}' to '{new}' ({updated} products)");
        Ok(updated)
    }

    /// Removes `name` from the set after moving its products to
    /// [`UNCATEGORIZED`]. Returns the number of products reassigned.
    pub fn delete_category(&mut self, name: &str) -> Result<usize> {
        let name = name.trim();
        if !self.has_category(name) {
            return Err(InventoryError::CategoryNotFound(name.to_string()));
        }

        let mut reassigned = 0;
        if name != UNCATEGORIZED {
            for product in self.products.iter_mut().filter(|p| p.category == name) {
                product.category = UNCATEGORIZED.to_string();
                product.touch();
                reassigned += 1;
            }
        }
        self.categories.retain(|c| c != name);
        log::info!("Deleted category '{name}' ({reassigned} products reassigned)");
        Ok(reassigned)
    }

    // ---- document ----

    /// Checks a deserialized catalog against the rules `register` enforces:
    /// non-empty code and name, a valid price, codes unique ignoring case.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for product in &self.products {
            let code = parse_non_empty("code", &product.code)?;
            parse_non_empty("name", &product.name)?;
            validate_price(product.price)?;
            if !seen.insert(code.to_lowercase()) {
                return Err(InventoryError::DuplicateCode(code));
            }
        }
        Ok(())
    }

    /// Moves products and the category set off [`LEGACY_UNCATEGORIZED`] onto
    /// [`UNCATEGORIZED`]. Returns the number of products moved.
    pub fn adopt_legacy_sentinel(&mut self) -> usize {
        let mut moved = 0;
        for product in self
            .products
            .iter_mut()
            .filter(|p| p.category == LEGACY_UNCATEGORIZED)
        {
            product.category = UNCATEGORIZED.to_string();
            moved += 1;
        }

        if let Some(slot) = self
            .categories
            .iter()
            .position(|c| c == LEGACY_UNCATEGORIZED)
        {
            if self.has_category(UNCATEGORIZED) {
                self.categories.remove(slot);
            } else {
                self.categories[slot] = UNCATEGORIZED.to_string();
            }
            log::info!(
                "Replaced legacy category '{LEGACY_UNCATEGORIZED}' with '{UNCATEGORIZED}'"
            );
        }
        moved
    }
}
