//! # Domain Errors
//!
//! ```text
//! ValidationError ──► CoreError ──► DbError (salesdesk-db) ──► ApiError (server)
//!   bad input          business        + storage failures       status + JSON
//!                      rejections
//! ```
//!
//! Messages of both enums here are user-facing and reach the HTTP caller
//! unchanged, so they name the offending field or product.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These are expected, user-facing conditions. Their messages are surfaced
/// verbatim to the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds the product's current stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Invoice line: Soap Bar 100g × 10
    ///      │
    ///      ▼
    /// Stock check: available = 5
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Soap Bar 100g", available: 5, requested: 10 }
    ///      │
    ///      ▼
    /// Whole invoice rejected, nothing written
    /// ```
    #[error("Not enough stock for product: {name} (available {available}, requested {requested})")]
    InsufficientStock {
        product_id: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// No invoice exists yet (latest / delete-latest on an empty store).
    #[error("No invoices found")]
    NoInvoices,

    /// An amount computation left the i64 range.
    #[error("Amount overflow while computing {0}")]
    AmountOverflow(&'static str),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic or database work runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
