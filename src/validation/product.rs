//! Product form validation.
//!
//! Price and quantity arrive as text (they come from text inputs) and must be
//! positive whole numbers.

use super::{FieldErrors, positive_integer, required};
use serde::{Deserialize, Serialize};

/// Raw product form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    /// Present when editing an existing product
    pub id: Option<String>,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

/// A validated product, ready to be created (`id == None`) or updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl ProductForm {
    /// Pre-fills the form from a stored product, for editing.
    #[must_use]
    pub fn from_product(product: &crate::entities::ProductModel) -> Self {
        Self {
            id: Some(product.id.to_string()),
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }

    /// Validates every field of the form.
    ///
    /// # Errors
    /// Returns the first error of each failing field.
    pub fn validate(&self) -> Result<ProductDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .map(Some)
                .ok_or_else(|| "Product id is not valid".to_string()),
        };
        errors.check("id", id.clone().map(|_| ()));
        errors.check("name", required(&self.name, "Name is required"));
        let price = positive_integer(self.price.trim(), "Price");
        errors.check("price", price.clone().map(|_| ()));
        let quantity = positive_integer(self.quantity.trim(), "Quantity");
        errors.check("quantity", quantity.clone().map(|_| ()));

        match (id, price, quantity) {
            (Ok(id), Ok(price), Ok(quantity)) if errors.is_empty() => Ok(ProductDraft {
                id,
                name: self.name.trim().to_string(),
                price,
                quantity,
                category_id: None,
            }),
            _ => Err(errors),
        }
    }
}

impl ProductDraft {
    /// Server-side check of a draft received as JSON.
    ///
    /// # Errors
    /// Returns the failing fields; numbers that were already typed only need
    /// to be positive.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.id.is_some_and(|id| id <= 0) {
            errors.add("id", "Product id is not valid");
        }
        errors.check("name", required(&self.name, "Name is required"));
        if self.price <= 0 {
            errors.add("price", "Price must be greater than 0");
        }
        if self.quantity <= 0 {
            errors.add("quantity", "Quantity must be greater than 0");
        }
        errors.into_result(|| ())
    }

    /// Whether submitting this draft updates an existing product.
    #[must_use]
    pub const fn is_update(&self) -> bool {
        self.id.is_some()
    }
}
