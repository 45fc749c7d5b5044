use crate::utils::now;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Category assigned to products with no explicit category, or whose
/// category was deleted.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Sentinel name written by older documents; mapped to [`UNCATEGORIZED`] on load.
pub const LEGACY_UNCATEGORIZED: &str = "Sin categoría";

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

/// A catalog record. `code` is the case-insensitive unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "codigo")]
    pub code: String,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "categoria", default = "default_category")]
    pub category: String,
    #[serde(alias = "cantidad", default)]
    pub quantity: u32,
    #[serde(alias = "precio", default)]
    pub price: f64,
    #[serde(alias = "descripcion", default)]
    pub description: String,
    #[serde(alias = "fecha_creacion")]
    pub created_at: NaiveDateTime,
    #[serde(
        alias = "fecha_modificacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<NaiveDateTime>,
}

impl Product {
    /// Case-insensitive comparison against the product code
    pub fn has_code(&self, code: &str) -> bool {
        self.code.to_lowercase() == code.trim().to_lowercase()
    }

    /// Stamp `modified_at` with the current time
    pub fn touch(&mut self) {
        self.modified_at = Some(now());
    }
}

/// Input for registering a product. Numeric fields are already validated by
/// the caller (see [`crate::parsers`]); `price` is re-checked on register.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    /// `None` or blank means [`UNCATEGORIZED`]
    pub category: Option<String>,
    pub quantity: u32,
    pub price: f64,
    pub description: Option<String>,
}

impl NewProduct {
    pub fn new(code: &str, name: &str, quantity: u32, price: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            quantity,
            price,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Partial update for an existing product.
///
/// Every field is raw text as typed by the user. `None` or blank text leaves
/// the field unchanged; quantity and price are parsed when applied, and a value
/// that fails to parse is rejected for that field only.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
}

impl ProductUpdate {
    pub fn name(mut self, value: &str) -> Self {
        self.name = Some(value.to_string());
        self
    }

    pub fn category(mut self, value: &str) -> Self {
        self.category = Some(value.to_string());
        self
    }

    pub fn quantity(mut self, value: &str) -> Self {
        self.quantity = Some(value.to_string());
        self
    }

    pub fn price(mut self, value: &str) -> Self {
        self.price = Some(value.to_string());
        self
    }

    pub fn description(mut self, value: &str) -> Self {
        self.description = Some(value.to_string());
        self
    }
}

/// A field of a [`ProductUpdate`] that was not applied
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRejection {
    pub field: &'static str,
    pub reason: String,
}

/// Result of a modify operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifyOutcome {
    /// Fields whose value actually changed
    pub changed: Vec<&'static str>,
    /// Fields that were supplied but rejected; the previous value was kept
    pub rejected: Vec<FieldRejection>,
    /// The supplied category was new and has been added to the category set
    pub category_added: bool,
}

impl ModifyOutcome {
    /// True when the product itself changed
    pub fn is_changed(&self) -> bool {
        !self.changed.is_empty()
    }

    /// True when the catalog needs to be persisted
    pub fn needs_save(&self) -> bool {
        self.is_changed() || self.category_added
    }
}

/// How `adjust_stock` changes the quantity on hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    /// quantity := n
    Set(u32),
    /// quantity := quantity + n
    Increment(u32),
    /// quantity := quantity - n, rejected when n > quantity
    Decrement(u32),
}

/// Caller's answer to "delete this product?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Interpret a typed answer. Only an explicit yes (`y`, `yes`, `s`, `si`,
    /// `sí`) confirms; anything else declines.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" | "s" | "si" | "sí" => Confirmation::Confirmed,
            _ => Confirmation::Declined,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        *self == Confirmation::Confirmed
    }
}
