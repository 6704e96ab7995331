use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace product record.
///
/// Invariant: `price`, when present, is non-negative. Enforced at the write
/// boundary (see [`ProductCreate::validate`] / [`ProductUpdate::validate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Record identifier (UUID string).
    pub id: String,
    /// Product name.
    pub name: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category label (e.g. `"Computer Accessories"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Listed price in the marketplace currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Marketplace the product is listed on.
    pub marketplace: String,
    /// Identifier of the listing on the external marketplace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Listing URL on the external marketplace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub marketplace: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ProductCreate {
    /// Checks the record invariants. Returns a human-readable reason on
    /// violation.
    pub fn validate(&self) -> Result<(), String> {
        validate_price(self.price)
    }
}

/// All-optional patch applied to an existing product. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ProductUpdate {
    /// Checks the record invariants for the fields being patched.
    pub fn validate(&self) -> Result<(), String> {
        validate_price(self.price)
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.marketplace.is_none()
            && self.external_id.is_none()
            && self.url.is_none()
    }
}

/// Listing filters and pagination for [`ProductStore::list_products`].
///
/// [`ProductStore::list_products`]: crate::store::ProductStore::list_products
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFilter {
    /// Keep only products listed on this marketplace.
    #[serde(default)]
    pub marketplace: Option<String>,
    /// Keep only products in this category.
    #[serde(default)]
    pub category: Option<String>,
    /// Number of matching records to skip.
    #[serde(default)]
    pub skip: usize,
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            marketplace: None,
            category: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    100
}

fn validate_price(price: Option<f64>) -> Result<(), String> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => {
            Err(format!("price must be a non-negative number, got {p}"))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let create = ProductCreate {
            name: "Wireless Mouse".into(),
            description: None,
            category: None,
            price: Some(-1.0),
            marketplace: "amazon".into(),
            external_id: None,
            url: None,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn absent_and_zero_prices_are_valid() {
        let mut update = ProductUpdate::default();
        assert!(update.validate().is_ok());
        update.price = Some(0.0);
        assert!(update.validate().is_ok());
    }
}
