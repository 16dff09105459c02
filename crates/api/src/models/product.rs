//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use matjar_core::ProductId;

/// A catalog product.
///
/// `stock` is informational: it drives display and client-side purchase
/// limits, and is never decremented by order placement.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a fresh product with a generated id.
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        price: Decimal,
        category: String,
        image: String,
        stock: i32,
    ) -> Self {
        Self {
            id: ProductId::generate(),
            name,
            description,
            price,
            category,
            image,
            stock,
            created_at: Utc::now(),
        }
    }
}

/// Partial product update; absent fields keep their prior values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub stock: Option<i32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let product = Product::new(
            "Laptop".to_owned(),
            String::new(),
            Decimal::from(4500),
            "electronics".to_owned(),
            String::new(),
            10,
        );
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["stock"], 10);
    }

    #[test]
    fn test_patch_accepts_partial_bodies() {
        let patch: ProductPatch = serde_json::from_str(r#"{"price": 99}"#).unwrap();
        assert_eq!(patch.price, Some(Decimal::from(99)));
        assert!(patch.name.is_none());
        assert!(patch.stock.is_none());
    }
}
