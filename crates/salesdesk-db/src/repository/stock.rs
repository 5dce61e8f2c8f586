//! # Stock Ledger
//!
//! Applies and reverses invoice quantities against product stock.
//!
//! ## Reserve: one conditional statement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ❌ WRONG: read, check, write (two invoices can both pass the check)   │
//! │     SELECT stock ... ; if stock >= q { UPDATE ... SET stock = ? }      │
//! │                                                                         │
//! │  ✅ CORRECT: check and decrement in one UPDATE                          │
//! │     UPDATE products SET stock = stock - q                              │
//! │     WHERE id = ? AND stock >= q                                        │
//! │     RETURNING id, name, price_cents                                    │
//! │                                                                         │
//! │  0 rows → product missing, or not enough stock (one follow-up read     │
//! │           tells which, for the error message)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both operations run on the caller's transaction connection, so stock
//! moves commit or roll back together with the invoice rows.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{debug, warn};

use crate::error::DbResult;
use salesdesk_core::{CoreError, ProductSnapshot};

/// Stateless stock operations on a borrowed connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockLedger;

impl StockLedger {
    /// Takes `quantity` units of `product_id` out of stock.
    ///
    /// ## Returns
    /// * `Ok(ProductSnapshot)` - Name and price as of this moment
    /// * `Err(CoreError::InsufficientStock)` - Stock unchanged. An unknown
    ///   product has nothing available and is named by its id.
    pub async fn reserve(
        conn: &mut SqliteConnection,
        product_id: &str,
        quantity: i64,
    ) -> DbResult<ProductSnapshot> {
        debug!(product_id = %product_id, quantity, "Reserving stock");

        let snapshot = sqlx::query_as::<_, ProductSnapshot>(
            r#"
            UPDATE products
            SET stock = stock - ?2, updated_at = ?3
            WHERE id = ?1 AND stock >= ?2
            RETURNING id, name, price_cents
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(Utc::now())
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(snapshot) = snapshot {
            return Ok(snapshot);
        }

        let current: Option<(String, i64)> =
            sqlx::query_as("SELECT name, stock FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&mut *conn)
                .await?;

        let (name, available) = current.unwrap_or_else(|| (product_id.to_string(), 0));
        debug!(
            product_id = %product_id,
            available,
            requested = quantity,
            "Insufficient stock"
        );
        Err(CoreError::InsufficientStock {
            product_id: product_id.to_string(),
            name,
            available,
            requested: quantity,
        }
        .into())
    }

    /// Puts `quantity` units of `product_id` back into stock.
    ///
    /// A product that no longer exists is skipped with a warning and
    /// `Ok(false)`: a deleted product must not block deleting an invoice.
    pub async fn restore(
        conn: &mut SqliteConnection,
        product_id: &str,
        quantity: i64,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            warn!(
                product_id = %product_id,
                quantity,
                "Product no longer exists, stock not restored"
            );
            return Ok(false);
        }

        debug!(product_id = %product_id, quantity, "Restored stock");
        Ok(true)
    }
}
