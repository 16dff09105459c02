//! Order ledger routes.
//!
//! Placement is open to any authenticated caller; listing all orders,
//! status updates, and deletion are admin-only. Line items are stored as
//! submitted - the catalog is only consulted to enrich responses for
//! display.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::PgPool;

use matjar_core::{OrderId, OrderStatus, ProductId};

use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, FieldError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::order::{AdminOrderView, LineItem, Order, OrderView, collect_product_ids};
use crate::models::product::Product;
use crate::state::AppState;

/// Body for placing an order: the client's cart snapshot, trusted verbatim.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub phone: String,
}

/// Body for overwriting an order's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// POST /api/orders (any authenticated user)
pub async fn create(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderView>)> {
    validate_order(&req)?;

    let order = Order::place(
        identity.user_id,
        req.items,
        req.total_amount,
        req.shipping_address,
        req.phone,
    );
    OrderRepository::new(state.pool()).create(&order).await?;

    let products = product_map(state.pool(), &collect_product_ids([&order])).await?;
    Ok((StatusCode::CREATED, Json(order.into_view(&products))))
}

/// GET /api/orders/my-orders
pub async fn my_orders(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderView>>> {
    let orders = OrderRepository::new(state.pool())
        .list_by_user(identity.user_id)
        .await?;

    let products = product_map(state.pool(), &collect_product_ids(&orders)).await?;
    Ok(Json(
        orders
            .into_iter()
            .map(|order| order.into_view(&products))
            .collect(),
    ))
}

/// GET /api/orders (admin)
pub async fn list_all(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminOrderView>>> {
    let rows = OrderRepository::new(state.pool()).list_all().await?;

    let ids = collect_product_ids(rows.iter().map(|(order, _)| order));
    let products = product_map(state.pool(), &ids).await?;

    Ok(Json(
        rows.into_iter()
            .map(|(order, owner)| order.into_admin_view(owner, &products))
            .collect(),
    ))
}

/// PUT /api/orders/{id}/status (admin)
pub async fn set_status(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<OrderView>> {
    let order = OrderRepository::new(state.pool())
        .set_status(id, req.status)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".to_owned()))?;

    let products = product_map(state.pool(), &collect_product_ids([&order])).await?;
    Ok(Json(order.into_view(&products)))
}

/// DELETE /api/orders/{id} (admin)
pub async fn remove(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Value>> {
    let deleted = OrderRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("order not found".to_owned()));
    }

    Ok(Json(json!({ "message": "order deleted" })))
}

/// Batch-resolve the given product ids into a lookup map. Deleted products
/// are simply absent.
async fn product_map(
    pool: &PgPool,
    ids: &[ProductId],
) -> Result<HashMap<ProductId, Product>> {
    let products = ProductRepository::new(pool).get_many(ids).await?;
    Ok(products.into_iter().map(|p| (p.id, p)).collect())
}

fn validate_order(req: &CreateOrderRequest) -> Result<()> {
    let mut errors = Vec::new();

    if req.items.is_empty() {
        errors.push(FieldError::new("items", "order must contain at least one item"));
    }
    if req.items.iter().any(|item| item.quantity < 1) {
        errors.push(FieldError::new("items", "item quantity must be at least 1"));
    }
    if req.shipping_address.trim().is_empty() {
        errors.push(FieldError::new(
            "shippingAddress",
            "shipping address is required",
        ));
    }
    if req.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "phone is required"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(items: Vec<LineItem>) -> CreateOrderRequest {
        CreateOrderRequest {
            items,
            total_amount: Decimal::from(25),
            shipping_address: "Riyadh".to_owned(),
            phone: "0501234567".to_owned(),
        }
    }

    fn item(quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::generate(),
            quantity,
            price: Decimal::from(10),
        }
    }

    #[test]
    fn test_validate_order_ok() {
        assert!(validate_order(&request(vec![item(2), item(1)])).is_ok());
    }

    #[test]
    fn test_validate_order_rejects_empty_cart() {
        assert!(validate_order(&request(Vec::new())).is_err());
    }

    #[test]
    fn test_validate_order_rejects_zero_quantity() {
        assert!(validate_order(&request(vec![item(0)])).is_err());
    }

    #[test]
    fn test_validate_order_requires_contact_fields() {
        let mut req = request(vec![item(1)]);
        req.shipping_address = "  ".to_owned();
        assert!(validate_order(&req).is_err());

        let mut req = request(vec![item(1)]);
        req.phone = String::new();
        assert!(validate_order(&req).is_err());
    }

    #[test]
    fn test_total_is_not_checked_against_items() {
        // The submitted total is trusted even when it disagrees with the
        // line items.
        let mut req = request(vec![item(2)]);
        req.total_amount = Decimal::from(999);
        assert!(validate_order(&req).is_ok());
    }
}
