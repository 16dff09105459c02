//! Order domain types.
//!
//! An order is a snapshot: line-item prices and the total are recorded as
//! submitted at purchase time and are never recomputed from the catalog.
//! Product and owner references are weak - the referent may be deleted at
//! any time, so enriched views carry `Option`s that the client renders with
//! a "deleted" fallback.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use matjar_core::{Email, OrderId, OrderStatus, ProductId, UserId};

use super::product::Product;

/// One product/quantity/price tuple within an order, immutable once placed.
///
/// The wire name of the product reference is `product`, matching what the
/// storefront client submits from its cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "product")]
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

/// A placed order, as stored.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot a new `pending` order from client-supplied line items.
    ///
    /// Prices and the total are taken verbatim from the request; the catalog
    /// is not consulted and stock is neither checked nor decremented.
    #[must_use]
    pub fn place(
        owner: UserId,
        items: Vec<LineItem>,
        total_amount: Decimal,
        shipping_address: String,
        phone: String,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            user_id: owner,
            items,
            total_amount,
            shipping_address,
            phone,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Customer-facing view with line items resolved against the catalog.
    ///
    /// A product id with no entry in `products` renders as `null`; the
    /// snapshot quantity and price are kept either way.
    #[must_use]
    pub fn into_view(self, products: &HashMap<ProductId, Product>) -> OrderView {
        OrderView {
            id: self.id,
            user: self.user_id,
            items: resolve_items(self.items, products),
            total_amount: self.total_amount,
            shipping_address: self.shipping_address,
            phone: self.phone,
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Back-office view: additionally carries the owner's name and email
    /// (`None` when the owning account was deleted).
    #[must_use]
    pub fn into_admin_view(
        self,
        owner: Option<OrderOwner>,
        products: &HashMap<ProductId, Product>,
    ) -> AdminOrderView {
        AdminOrderView {
            id: self.id,
            user: owner,
            items: resolve_items(self.items, products),
            total_amount: self.total_amount,
            shipping_address: self.shipping_address,
            phone: self.phone,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Distinct product ids referenced by a set of orders, for batch resolution.
#[must_use]
pub fn collect_product_ids<'a, I>(orders: I) -> Vec<ProductId>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut seen = std::collections::HashSet::new();
    let mut ids = Vec::new();
    for order in orders {
        for item in &order.items {
            if seen.insert(item.product_id) {
                ids.push(item.product_id);
            }
        }
    }
    ids
}

fn resolve_items(
    items: Vec<LineItem>,
    products: &HashMap<ProductId, Product>,
) -> Vec<ResolvedLineItem> {
    items
        .into_iter()
        .map(|item| ResolvedLineItem {
            product: products.get(&item.product_id).cloned(),
            quantity: item.quantity,
            price: item.price,
        })
        .collect()
}

/// A line item with its product reference resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLineItem {
    pub product: Option<Product>,
    pub quantity: u32,
    pub price: Decimal,
}

/// Owner summary attached to admin order listings.
#[derive(Debug, Clone, Serialize)]
pub struct OrderOwner {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// Customer-facing order representation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub user: UserId,
    pub items: Vec<ResolvedLineItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Back-office order representation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderView {
    pub id: OrderId,
    pub user: Option<OrderOwner>,
    pub items: Vec<ResolvedLineItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem {
                product_id: ProductId::generate(),
                quantity: 2,
                price: Decimal::from(10),
            },
            LineItem {
                product_id: ProductId::generate(),
                quantity: 1,
                price: Decimal::from(5),
            },
        ]
    }

    #[test]
    fn test_place_snapshots_items_verbatim() {
        let owner = UserId::generate();
        let items = sample_items();
        let order = Order::place(
            owner,
            items.clone(),
            Decimal::from(25),
            "Riyadh".to_owned(),
            "0501234567".to_owned(),
        );

        assert_eq!(order.user_id, owner);
        assert_eq!(order.items, items);
        assert_eq!(order.total_amount, Decimal::from(25));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_place_does_not_rederive_total() {
        // The server trusts the submitted total even when it disagrees with
        // the line items.
        let order = Order::place(
            UserId::generate(),
            sample_items(),
            Decimal::from(1),
            "Riyadh".to_owned(),
            "0501234567".to_owned(),
        );
        assert_eq!(order.total_amount, Decimal::from(1));
    }

    #[test]
    fn test_view_substitutes_null_for_deleted_products() {
        let items = sample_items();
        let known_id = items.first().unwrap().product_id;
        let order = Order::place(
            UserId::generate(),
            items,
            Decimal::from(25),
            "Riyadh".to_owned(),
            "0501234567".to_owned(),
        );

        let mut products = HashMap::new();
        products.insert(
            known_id,
            Product {
                id: known_id,
                name: "Laptop".to_owned(),
                description: String::new(),
                price: Decimal::from(10),
                category: String::new(),
                image: String::new(),
                stock: 3,
                created_at: Utc::now(),
            },
        );

        let view = order.into_view(&products);
        assert_eq!(view.items.len(), 2);
        let resolved = view.items.first().unwrap();
        let missing = view.items.get(1).unwrap();
        assert_eq!(resolved.product.as_ref().unwrap().name, "Laptop");
        assert!(missing.product.is_none());
        // Snapshot values survive resolution either way.
        assert_eq!(resolved.quantity, 2);
        assert_eq!(missing.price, Decimal::from(5));
    }

    #[test]
    fn test_view_serializes_null_product() {
        let order = Order::place(
            UserId::generate(),
            sample_items(),
            Decimal::from(25),
            "Riyadh".to_owned(),
            "0501234567".to_owned(),
        );
        let json = serde_json::to_value(order.into_view(&HashMap::new())).unwrap();
        assert!(json["items"][0]["product"].is_null());
        assert_eq!(json["items"][0]["quantity"], 2);
        assert!(json.get("totalAmount").is_some());
    }

    #[test]
    fn test_line_item_wire_name_is_product() {
        let item: LineItem =
            serde_json::from_value(serde_json::json!({
                "product": uuid::Uuid::new_v4().to_string(),
                "quantity": 3,
                "price": 12,
            }))
            .unwrap();
        assert_eq!(item.quantity, 3);

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("product").is_some());
        assert!(json.get("productId").is_none());
    }

    #[test]
    fn test_collect_product_ids_dedups() {
        let shared = ProductId::generate();
        let mk = |items: Vec<LineItem>| {
            Order::place(
                UserId::generate(),
                items,
                Decimal::from(1),
                "a".to_owned(),
                "b".to_owned(),
            )
        };
        let first = mk(vec![LineItem {
            product_id: shared,
            quantity: 1,
            price: Decimal::from(1),
        }]);
        let second = mk(vec![
            LineItem {
                product_id: shared,
                quantity: 2,
                price: Decimal::from(1),
            },
            LineItem {
                product_id: ProductId::generate(),
                quantity: 1,
                price: Decimal::from(1),
            },
        ]);

        let ids = collect_product_ids([&first, &second]);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.first(), Some(&shared));
    }
}
