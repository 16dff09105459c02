//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /api/auth/register       - create user, returns token+user
//! POST /api/auth/login          - authenticate, returns token+user
//!
//! # Products
//! GET    /api/products          - list catalog (public)
//! GET    /api/products/{id}     - one product (public)
//! POST   /api/products          - create product (admin)
//! PUT    /api/products/{id}     - partial update (admin)
//! DELETE /api/products/{id}     - delete (admin)
//!
//! # Orders
//! POST   /api/orders            - place order from cart snapshot (any user)
//! GET    /api/orders/my-orders  - caller's orders, newest first
//! GET    /api/orders            - all orders, newest first (admin)
//! PUT    /api/orders/{id}/status - set status field (admin)
//! DELETE /api/orders/{id}       - delete order (admin)
//!
//! # Users
//! GET    /api/users             - list users, no password hashes (admin)
//! GET    /api/users/me          - caller's own record
//! PUT    /api/users/me          - update name/address/phone
//! DELETE /api/users/{id}        - delete a user (admin)
//! ```

pub mod auth;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/products",
            get(products::list).post(products::create),
        )
        .route(
            "/api/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/api/orders", get(orders::list_all).post(orders::create))
        .route("/api/orders/my-orders", get(orders::my_orders))
        .route("/api/orders/{id}/status", put(orders::set_status))
        .route("/api/orders/{id}", delete(orders::remove))
        .route("/api/users", get(users::list))
        .route("/api/users/me", get(users::me).put(users::update_me))
        .route("/api/users/{id}", delete(users::remove))
}
