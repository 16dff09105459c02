//! Order ledger repository.
//!
//! Line items are stored as a JSONB snapshot; `user_id` is a weak reference
//! with no foreign key, so owner lookups use a LEFT JOIN and tolerate a
//! deleted account.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use matjar_core::{Email, OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::order::{LineItem, Order, OrderOwner};

const ORDER_COLUMNS: &str =
    "id, user_id, items, total_amount, shipping_address, phone, status, created_at";

/// Raw row shape; converted to the domain type with validation.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    items: Json<Vec<LineItem>>,
    total_amount: Decimal,
    shipping_address: String,
    phone: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            items: row.items.0,
            total_amount: row.total_amount,
            shipping_address: row.shipping_address,
            phone: row.phone,
            status,
            created_at: row.created_at,
        })
    }
}

/// Order row joined with its (possibly deleted) owner.
#[derive(sqlx::FromRow)]
struct JoinedOrderRow {
    #[sqlx(flatten)]
    order: OrderRow,
    owner_name: Option<String>,
    owner_email: Option<String>,
}

impl JoinedOrderRow {
    fn into_parts(self) -> Result<(Order, Option<OrderOwner>), RepositoryError> {
        let user_id = UserId::new(self.order.user_id);
        let order = Order::try_from(self.order)?;

        let owner = match (self.owner_name, self.owner_email) {
            (Some(name), Some(email)) => {
                let email = Email::parse(&email).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
                })?;
                Some(OrderOwner {
                    id: user_id,
                    name,
                    email,
                })
            }
            _ => None,
        };

        Ok((order, owner))
    }
}

/// Repository for order ledger database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a newly placed order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO orders (id, user_id, items, total_amount, shipping_address, phone, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(&order.shipping_address)
        .bind(&order.phone)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Orders owned by one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored record is invalid.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Every order, newest first, each with its owner's name and email when
    /// the owning account still exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored record is invalid.
    pub async fn list_all(&self) -> Result<Vec<(Order, Option<OrderOwner>)>, RepositoryError> {
        let rows = sqlx::query_as::<_, JoinedOrderRow>(
            "SELECT o.id, o.user_id, o.items, o.total_amount, o.shipping_address,
                    o.phone, o.status, o.created_at,
                    u.name AS owner_name, u.email AS owner_email
             FROM orders o
             LEFT JOIN users u ON u.id = o.user_id
             ORDER BY o.created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(JoinedOrderRow::into_parts).collect()
    }

    /// Overwrite the status of an order unconditionally.
    ///
    /// Returns the updated order, or `None` if no order matches. Concurrent
    /// writers race and the last write wins; there is no version column.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored record is invalid.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Delete an order irreversibly.
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
