//! # Invoice Repository
//!
//! The invoice lifecycle: create, read the latest, delete the latest.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Lifecycle                                 │
//! │                                                                         │
//! │   Draft (request) ──create()──► Persisted ──delete_latest()──► Deleted  │
//! │                                     │                                   │
//! │                                  latest()                               │
//! │                                                                         │
//! │  No update-in-place. Only the newest invoice can be deleted.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## create() in one transaction
//! ```text
//! BEGIN
//!   upsert customer by store_name      (first statement writes → write lock)
//!   for each line: StockLedger::reserve (first failure → rollback, nothing kept)
//!   load discount tiers, compute totals from snapshot prices
//!   next sequence = MAX(sequence) + 1
//!   INSERT invoice, INSERT items (name + price snapshots)
//! COMMIT
//! ```
//!
//! Dropping a `sqlx::Transaction` without commit rolls it back, so every
//! early `?` return leaves the database untouched.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::customer::CustomerRepository;
use crate::repository::discount_rule::DiscountRuleRepository;
use crate::repository::stock::StockLedger;
use salesdesk_core::validation::validate_new_invoice;
use salesdesk_core::{
    CoreError, Customer, Invoice, InvoiceDetail, InvoiceItem, InvoiceTotals, LineAmount,
    NewInvoice, ProductSnapshot, RestoredStock,
};

/// Result of a successful `create()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedInvoice {
    pub invoice_id: String,
    pub sequence: i64,
    pub customer_id: String,
    pub totals: InvoiceTotals,
    /// Snapshot unit price of each line, in request order.
    pub unit_prices_cents: Vec<i64>,
}

/// Result of a successful `delete_latest()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedInvoice {
    pub invoice_id: String,
    /// Stock given back, one entry per item whose product still exists.
    pub restored: Vec<RestoredStock>,
    /// Items whose product was gone.
    pub skipped: usize,
}

#[derive(Debug, sqlx::FromRow)]
struct DeletedItem {
    product_id: Option<String>,
    quantity: i64,
}

/// Repository for invoice operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = InvoiceRepository::new(pool);
///
/// let created = repo.create(new_invoice).await?;
/// let detail = repo.latest().await?;
/// let deleted = repo.delete_latest().await?;
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Persists an invoice, consuming stock for every line.
    ///
    /// ## Errors
    /// * `CoreError::Validation` - empty store name, no items, bad quantity
    /// * `CoreError::InsufficientStock` - a line asks for more than is left,
    ///   or names a product that does not exist
    ///
    /// On any error nothing is written: no customer, no invoice, no stock
    /// change.
    pub async fn create(&self, new: NewInvoice) -> DbResult<CreatedInvoice> {
        validate_new_invoice(&new)?;

        debug!(
            store_name = %new.customer.store_name,
            lines = new.lines.len(),
            "Creating invoice"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let customer = CustomerRepository::find_or_create(&mut *tx, &new.customer).await?;

        let mut reserved: Vec<(ProductSnapshot, i64)> = Vec::with_capacity(new.lines.len());
        for line in &new.lines {
            let snapshot = StockLedger::reserve(&mut *tx, &line.product_id, line.quantity).await?;
            reserved.push((snapshot, line.quantity));
        }

        let tiers = DiscountRuleRepository::tiers(&mut *tx).await?;
        let amounts: Vec<LineAmount> = reserved
            .iter()
            .map(|(snapshot, quantity)| LineAmount::new(snapshot.price(), *quantity))
            .collect();
        let totals = InvoiceTotals::compute(&amounts, &tiers)?;

        let sequence = next_sequence(&mut *tx).await?;
        let now = Utc::now();
        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            sequence,
            customer_id: customer.id.clone(),
            subtotal_cents: totals.subtotal.minor(),
            discount_rate_bps: i64::from(totals.discount_rate.bps()),
            discount_cents: totals.discount.minor(),
            total_cents: totals.total.minor(),
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, sequence, customer_id,
                subtotal_cents, discount_rate_bps, discount_cents, total_cents,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&invoice.id)
        .bind(invoice.sequence)
        .bind(&invoice.customer_id)
        .bind(invoice.subtotal_cents)
        .bind(invoice.discount_rate_bps)
        .bind(invoice.discount_cents)
        .bind(invoice.total_cents)
        .bind(invoice.created_at)
        .execute(&mut *tx)
        .await?;

        for ((snapshot, quantity), amount) in reserved.iter().zip(&amounts) {
            let line_total = amount.total()?;
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, product_id, name_snapshot,
                    unit_price_cents, quantity, line_total_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&invoice.id)
            .bind(&snapshot.id)
            .bind(&snapshot.name)
            .bind(snapshot.price_cents)
            .bind(*quantity)
            .bind(line_total.minor())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            invoice_id = %invoice.id,
            sequence,
            customer = %customer.store_name,
            subtotal = %totals.subtotal,
            discount_rate = %totals.discount_rate,
            total = %totals.total,
            "Invoice created"
        );

        Ok(CreatedInvoice {
            invoice_id: invoice.id,
            sequence,
            customer_id: customer.id,
            totals,
            unit_prices_cents: reserved.iter().map(|(s, _)| s.price_cents).collect(),
        })
    }

    /// Returns the most recent invoice with its customer and items.
    ///
    /// "Most recent" is `created_at DESC`, ties broken by `sequence DESC`.
    ///
    /// ## Errors
    /// `CoreError::NoInvoices` when there are none.
    pub async fn latest(&self) -> DbResult<InvoiceDetail> {
        let mut conn = self.pool.acquire().await?;

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, sequence, customer_id,
                   subtotal_cents, discount_rate_bps, discount_cents, total_cents,
                   created_at
            FROM invoices
            ORDER BY created_at DESC, sequence DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(CoreError::NoInvoices)?;

        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, store_name, contact_number, created_at FROM customers WHERE id = ?1",
        )
        .bind(&invoice.customer_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DbError::not_found("Customer", &invoice.customer_id))?;

        let items = load_items(&mut conn, &invoice.id).await?;

        debug!(invoice_id = %invoice.id, items = items.len(), "Loaded latest invoice");

        Ok(InvoiceDetail {
            invoice,
            customer,
            items,
        })
    }

    /// Deletes the most recent invoice and gives its stock back.
    ///
    /// Items whose product no longer exists are skipped (see
    /// [`StockLedger::restore`]). With no invoices nothing is touched.
    ///
    /// ## Errors
    /// `CoreError::NoInvoices` when there are none.
    pub async fn delete_latest(&self) -> DbResult<DeletedInvoice> {
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        // Write first, same reason as the customer upsert in create().
        let items = sqlx::query_as::<_, DeletedItem>(
            r#"
            DELETE FROM invoice_items
            WHERE invoice_id = (
                SELECT id FROM invoices ORDER BY created_at DESC, sequence DESC LIMIT 1
            )
            RETURNING product_id, quantity
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let mut restored = Vec::with_capacity(items.len());
        let mut skipped = 0;
        for item in items {
            let Some(product_id) = item.product_id else {
                skipped += 1;
                continue;
            };
            if StockLedger::restore(&mut *tx, &product_id, item.quantity).await? {
                restored.push(RestoredStock {
                    product_id,
                    quantity: item.quantity,
                });
            } else {
                skipped += 1;
            }
        }

        let invoice_id: Option<String> = sqlx::query_scalar(
            r#"
            DELETE FROM invoices
            WHERE id = (
                SELECT id FROM invoices ORDER BY created_at DESC, sequence DESC LIMIT 1
            )
            RETURNING id
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping tx here rolls back the (empty) item delete.
        let invoice_id = invoice_id.ok_or(CoreError::NoInvoices)?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            invoice_id = %invoice_id,
            restored = restored.len(),
            skipped,
            "Latest invoice deleted"
        );

        Ok(DeletedInvoice {
            invoice_id,
            restored,
            skipped,
        })
    }

    /// Counts invoices (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Gets the items of an invoice in insertion order.
    pub async fn items(&self, invoice_id: &str) -> DbResult<Vec<InvoiceItem>> {
        let mut conn = self.pool.acquire().await?;
        load_items(&mut conn, invoice_id).await
    }
}

async fn next_sequence(conn: &mut SqliteConnection) -> DbResult<i64> {
    let sequence: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(sequence), 0) + 1 FROM invoices")
        .fetch_one(&mut *conn)
        .await?;
    Ok(sequence)
}

async fn load_items(conn: &mut SqliteConnection, invoice_id: &str) -> DbResult<Vec<InvoiceItem>> {
    let items = sqlx::query_as::<_, InvoiceItem>(
        r#"
        SELECT id, invoice_id, product_id, name_snapshot,
               unit_price_cents, quantity, line_total_cents, created_at
        FROM invoice_items
        WHERE invoice_id = ?1
        ORDER BY rowid
        "#,
    )
    .bind(invoice_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(items)
}

// =============================================================================
// Tests
// =============================================================================
