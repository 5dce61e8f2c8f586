//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - List and lookup
//! - Create and partial update
//!
//! Stock changes caused by invoices never go through this repository, they
//! go through [`StockLedger`](super::stock::StockLedger) inside the invoice
//! transaction. `update` here is the manual stock correction path.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use salesdesk_core::validation::{validate_new_product, validate_product_patch};
use salesdesk_core::{NewProduct, Product, ProductPatch};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let catalog = repo.list().await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, name_si, price_cents, stock, created_at, updated_at
            FROM products
            ORDER BY name COLLATE NOCASE, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, name_si, price_cents, stock, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID, `DbError::NotFound` when missing.
    pub async fn get(&self, id: &str) -> DbResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Finds a product by exact name (used by the seed tool to skip
    /// existing catalog entries).
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, name_si, price_cents, stock, created_at, updated_at
            FROM products
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn create(&self, new: NewProduct) -> DbResult<Product> {
        validate_new_product(&new)?;

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: new.name,
            name_si: new.name_si,
            price_cents: new.price_cents,
            stock: new.stock,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, name_si, price_cents, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.name_si)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Applies a partial update. Fields left `None` keep their value;
    /// `name_si: Some(None)` sets the localized name to NULL.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated row
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: &str, patch: ProductPatch) -> DbResult<Product> {
        validate_product_patch(&patch)?;

        debug!(id = %id, ?patch, "Updating product");

        let set_name_si = patch.name_si.is_some();
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE(?2, name),
                name_si = CASE WHEN ?7 THEN ?3 ELSE name_si END,
                price_cents = COALESCE(?4, price_cents),
                stock = COALESCE(?5, stock),
                updated_at = ?6
            WHERE id = ?1
            RETURNING id, name, name_si, price_cents, stock, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.name_si.flatten())
        .bind(patch.price_cents)
        .bind(patch.stock)
        .bind(Utc::now())
        .bind(set_name_si)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    fn soap() -> NewProduct {
        NewProduct {
            name: "Soap Bar 100g".to_string(),
            name_si: Some("සබන් 100g".to_string()),
            price_cents: 18_000,
            stock: 100,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo().await;
        let created = repo.create(soap()).await.unwrap();

        let fetched = repo.get(&created.id).await.unwrap();
        assert_eq!(fetched.name, "Soap Bar 100g");
        assert_eq!(fetched.name_si.as_deref(), Some("සබන් 100g"));
        assert_eq!(fetched.price_cents, 18_000);
        assert_eq!(fetched.stock, 100);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid() {
        let repo = repo().await;
        let err = repo
            .create(NewProduct {
                stock: -1,
                ..soap()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let repo = repo().await;
        repo.create(soap()).await.unwrap();
        repo.create(NewProduct {
            name: "Detergent Powder 1kg".to_string(),
            name_si: None,
            price_cents: 120_000,
            stock: 50,
        })
        .await
        .unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Detergent Powder 1kg", "Soap Bar 100g"]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = repo().await;
        let created = repo.create(soap()).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                ProductPatch {
                    price_cents: Some(20_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 20_000);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.stock, created.stock);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_name_si() {
        let repo = repo().await;
        let created = repo.create(soap()).await.unwrap();

        let untouched = repo
            .update(
                &created.id,
                ProductPatch {
                    stock: Some(90),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(untouched.name_si.as_deref(), Some("සබන් 100g"));

        let renamed = repo
            .update(
                &created.id,
                ProductPatch {
                    name_si: Some(Some("සබන් කැට 100g".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name_si.as_deref(), Some("සබන් කැට 100g"));

        let cleared = repo
            .update(
                &created.id,
                ProductPatch {
                    name_si: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.name_si, None);
        assert_eq!(cleared.stock, 90);
        assert_eq!(repo.get(&created.id).await.unwrap().name_si, None);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update(
                "missing",
                ProductPatch {
                    stock: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let repo = repo().await;
        repo.create(soap()).await.unwrap();
        assert!(repo.find_by_name("Soap Bar 100g").await.unwrap().is_some());
        assert!(repo.find_by_name("Shampoo").await.unwrap().is_none());
    }
}
