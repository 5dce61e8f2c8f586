//! # salesdesk-core: Pure Business Logic for SalesDesk
//!
//! This crate contains the invoicing rules of the sales agency backend as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Mobile client / salesdesk-client                   │   │
//! │  │    Catalog ──► Invoice ──► Stock ──► Expenses ──► Settings      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP + JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ salesdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │  totals   │  │   │
//! │  │   │  Product  │  │   Money   │  │  engine   │  │ subtotal  │  │   │
//! │  │   │  Invoice  │  │ Discount  │  │  tiers    │  │ discount  │  │   │
//! │  │   │  Expense  │  │   Rate    │  │           │  │  total    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 salesdesk-db (Database Layer)                   │   │
//! │  │        SQLite queries, migrations, stock ledger, invoices       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Invoice, Expense, ...)
//! - [`money`] - Money and DiscountRate with integer arithmetic
//! - [`discount`] - Tiered discount rule selection
//! - [`totals`] - Invoice subtotal/discount/total computation
//! - [`dto`] - JSON request/response bodies shared by server and client
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use salesdesk_core::money::Money;
//! use salesdesk_core::totals::{InvoiceTotals, LineAmount};
//! use salesdesk_core::types::DiscountTier;
//!
//! let tiers = [
//!     DiscountTier::new(Money::from_major(5_000), 200),
//!     DiscountTier::new(Money::from_major(10_000), 500),
//! ];
//! let lines = [LineAmount::new(Money::from_major(1_200), 10)];
//!
//! let totals = InvoiceTotals::compute(&lines, &tiers).unwrap();
//! assert_eq!(totals.subtotal, Money::from_major(12_000));
//! assert_eq!(totals.discount, Money::from_major(600));
//! assert_eq!(totals.total, Money::from_major(11_400));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod dto;
pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use totals::{InvoiceTotals, LineAmount};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed on a single invoice.
pub const MAX_INVOICE_ITEMS: usize = 100;

/// Maximum quantity of a single product on one line.
///
/// Wholesale orders run into the thousands of units, the cap only catches
/// typing mistakes.
pub const MAX_ITEM_QUANTITY: i64 = 100_000;
