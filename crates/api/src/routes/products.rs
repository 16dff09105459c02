//! Catalog routes.
//!
//! Reads are public; every mutation is gated on the admin role.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use matjar_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::{AppError, FieldError, Result};
use crate::middleware::RequireAdmin;
use crate::models::product::{Product, ProductPatch};
use crate::state::AppState;

/// Body for creating a product. Name and price are mandatory; everything
/// else defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub stock: i32,
}

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    Ok(Json(product))
}

/// POST /api/products (admin)
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    validate_new_product(&req)?;

    let product = Product::new(
        req.name.trim().to_owned(),
        req.description,
        req.price,
        req.category,
        req.image,
        req.stock,
    );
    ProductRepository::new(state.pool()).create(&product).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id} (admin) - partial merge
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    validate_patch(&patch)?;

    let product = ProductRepository::new(state.pool())
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    Ok(Json(product))
}

/// DELETE /api/products/{id} (admin)
///
/// Orders referencing the product keep their snapshot and render a
/// "deleted product" fallback client-side.
pub async fn remove(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Value>> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("product not found".to_owned()));
    }

    Ok(Json(json!({ "message": "product deleted" })))
}

fn validate_new_product(req: &CreateProductRequest) -> Result<()> {
    let mut errors = Vec::new();

    if req.name.trim().is_empty() {
        errors.push(FieldError::new("name", "name is required"));
    }
    if req.price <= Decimal::ZERO {
        errors.push(FieldError::new("price", "price must be positive"));
    }
    if req.stock < 0 {
        errors.push(FieldError::new("stock", "stock cannot be negative"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn validate_patch(patch: &ProductPatch) -> Result<()> {
    let mut errors = Vec::new();

    if let Some(name) = &patch.name
        && name.trim().is_empty()
    {
        errors.push(FieldError::new("name", "name is required"));
    }
    if let Some(price) = patch.price
        && price <= Decimal::ZERO
    {
        errors.push(FieldError::new("price", "price must be positive"));
    }
    if let Some(stock) = patch.stock
        && stock < 0
    {
        errors.push(FieldError::new("stock", "stock cannot be negative"));
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

    fn request(price: i64, stock: i32) -> CreateProductRequest {
        CreateProductRequest {
            name: "Laptop".to_owned(),
            description: String::new(),
            price: Decimal::from(price),
            category: String::new(),
            image: String::new(),
            stock,
        }
    }

    #[test]
    fn test_validate_new_product_ok() {
        assert!(validate_new_product(&request(4500, 10)).is_ok());
    }

    #[test]
    fn test_validate_new_product_rejects_non_positive_price() {
        assert!(validate_new_product(&request(0, 10)).is_err());
        assert!(validate_new_product(&request(-5, 10)).is_err());
    }

    #[test]
    fn test_validate_new_product_rejects_negative_stock() {
        assert!(validate_new_product(&request(10, -1)).is_err());
    }

    #[test]
    fn test_validate_patch_ignores_absent_fields() {
        assert!(validate_patch(&ProductPatch::default()).is_ok());
    }

    #[test]
    fn test_validate_patch_checks_present_fields() {
        let patch = ProductPatch {
            price: Some(Decimal::ZERO),
            ..ProductPatch::default()
        };
        assert!(validate_patch(&patch).is_err());

        let patch = ProductPatch {
            stock: Some(-2),
            ..ProductPatch::default()
        };
        assert!(validate_patch(&patch).is_err());
    }
}
