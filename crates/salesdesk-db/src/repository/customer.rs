//! # Customer Repository
//!
//! Customers are created implicitly the first time an invoice names their
//! store. `store_name` is UNIQUE, so "lookup or create" is a single upsert
//! followed by a read, both on the caller's connection.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use salesdesk_core::{Customer, CustomerDetails};

#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists customers ordered by store name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, store_name, contact_number, created_at
            FROM customers
            ORDER BY store_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_by_store_name(&self, store_name: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, store_name, contact_number, created_at
            FROM customers
            WHERE store_name = ?1
            "#,
        )
        .bind(store_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Returns the customer for `details.store_name`, inserting it if new.
    ///
    /// The INSERT runs first so that inside a transaction the connection
    /// holds SQLite's write lock from the first statement on. An existing
    /// customer keeps its stored contact number.
    pub async fn find_or_create(
        conn: &mut SqliteConnection,
        details: &CustomerDetails,
    ) -> DbResult<Customer> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO customers (id, store_name, contact_number, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (store_name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&details.store_name)
        .bind(&details.contact_number)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?
        .rows_affected();

        debug!(
            store_name = %details.store_name,
            created = inserted > 0,
            "Resolved customer"
        );

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, store_name, contact_number, created_at
            FROM customers
            WHERE store_name = ?1
            "#,
        )
        .bind(&details.store_name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(customer)
    }
}
