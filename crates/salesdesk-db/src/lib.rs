//! # salesdesk-db: Database Layer for SalesDesk
//!
//! This crate provides database access for the SalesDesk backend.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesDesk Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/invoices)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  salesdesk-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ InvoiceRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ StockLedger   │    │ 001_initial  │  │   │
//! │  │   │ WAL, FKs on   │    │ ProductRepo   │    │  _schema.sql │  │   │
//! │  │   │ busy_timeout  │    │ ExpenseRepo.. │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./salesdesk.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations and the stock ledger
//! - [`seed`] - Default catalog and discount tiers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use salesdesk_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./salesdesk.db")).await?;
//! let created = db.invoices().create(new_invoice).await?;
//! let latest = db.invoices().latest().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::discount_rule::DiscountRuleRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::invoice::{CreatedInvoice, DeletedInvoice, InvoiceRepository};
pub use repository::product::ProductRepository;
pub use repository::stock::StockLedger;
