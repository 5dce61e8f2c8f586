//! # Repository Module
//!
//! Database repository implementations for SalesDesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │  db.invoices().create(new_invoice)                             │
//! │       ▼                                                                 │
//! │  InvoiceRepository ──── one transaction ────┐                          │
//! │       │                                     │                          │
//! │       ├── CustomerRepository::find_or_create(conn)                     │
//! │       ├── StockLedger::reserve / restore(conn)                         │
//! │       └── DiscountRuleRepository::tiers(conn)                          │
//! │                                                                         │
//! │  Pool-level repositories (own a SqlitePool clone):                     │
//! │  ProductRepository, CustomerRepository, DiscountRuleRepository,        │
//! │  ExpenseRepository, InvoiceRepository                                  │
//! │                                                                         │
//! │  Connection-level helpers (borrow the caller's transaction):           │
//! │  StockLedger, CustomerRepository::find_or_create,                      │
//! │  DiscountRuleRepository::tiers                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customer;
pub mod discount_rule;
pub mod expense;
pub mod invoice;
pub mod product;
pub mod stock;
