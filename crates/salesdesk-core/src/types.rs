//! # Domain Types
//!
//! Core domain types used throughout SalesDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Invoice     │   │   InvoiceItem   │       │
//! │  │  ─────────────  │ 1 │  ─────────────  │ 1 │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  id (UUID)      │──►│  product_id     │       │
//! │  │  store_name     │ * │  sequence       │ * │  name_snapshot  │       │
//! │  │  contact_number │   │  totals         │   │  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ (nullable)     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────▼────────┐       │
//! │  │  DiscountRule   │   │     Expense     │   │     Product     │       │
//! │  │  min_amount     │   │  type, amount   │   │  price, stock   │       │
//! │  │  percentage_bps │   │  description    │   │  name, name_si  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Invoice items copy the product name and unit price at the moment the
//! invoice is persisted. Later product edits never rewrite history.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{DiscountRate, Money};

// =============================================================================
// Product
// =============================================================================

/// A product in the agency's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name (English).
    pub name: String,

    /// Localized display name (Sinhala).
    pub name_si: Option<String>,

    /// Unit price in minor units.
    pub price_cents: i64,

    /// Units available for sale. Never negative.
    pub stock: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price_cents)
    }

    /// Checks whether `quantity` units can be taken from stock.
    pub fn can_supply(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

/// The product fields captured when stock is reserved for an invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
}

impl ProductSnapshot {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price_cents)
    }
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub name_si: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
}

/// Partial product update. `None` leaves the column untouched.
///
/// `name_si: Some(None)` clears the localized name.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub name_si: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.name_si.is_none()
            && self.price_cents.is_none()
            && self.stock.is_none()
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A retail store buying from the agency.
///
/// `store_name` is the business key: invoices look customers up by it and
/// create one on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub store_name: String,
    pub contact_number: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Customer details as typed on the invoice screen.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub store_name: String,
    pub contact_number: Option<String>,
}

// =============================================================================
// Discount Rules
// =============================================================================

/// A stored discount threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    pub id: String,
    /// Subtotal (minor units) from which the rule applies, inclusive.
    pub min_amount_cents: i64,
    /// Discount in basis points (500 = 5%).
    pub percentage_bps: i64,
}

impl DiscountRule {
    /// Returns the rule as a tier the discount engine can evaluate.
    pub fn tier(&self) -> DiscountTier {
        DiscountTier {
            min_amount: Money::from_minor(self.min_amount_cents),
            rate: DiscountRate::from_bps(self.percentage_bps.clamp(0, u32::MAX as i64) as u32),
        }
    }
}

/// A threshold/percentage pair evaluated by [`crate::discount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    pub min_amount: Money,
    pub rate: DiscountRate,
}

impl DiscountTier {
    pub const fn new(min_amount: Money, bps: u32) -> Self {
        DiscountTier {
            min_amount,
            rate: DiscountRate::from_bps(bps),
        }
    }
}

/// Input for creating a discount rule.
#[derive(Debug, Clone, Copy)]
pub struct NewDiscountRule {
    pub min_amount_cents: i64,
    pub percentage_bps: i64,
}

// =============================================================================
// Invoice
// =============================================================================

/// A persisted invoice header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    /// Monotonic creation order, tie-breaker for equal timestamps.
    pub sequence: i64,
    pub customer_id: String,
    pub subtotal_cents: i64,
    pub discount_rate_bps: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_cents)
    }
}

/// A line item of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    /// Current product reference. `None` once the product row is gone.
    pub product_id: Option<String>,
    /// Product name at time of invoicing (frozen).
    pub name_snapshot: String,
    /// Unit price at time of invoicing (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl InvoiceItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.unit_price_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_minor(self.line_total_cents)
    }
}

/// An invoice with its customer and items, as loaded for "last invoice".
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub customer: Customer,
    pub items: Vec<InvoiceItem>,
}

/// Stock given back to a product when an invoice is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RestoredStock {
    pub product_id: String,
    pub quantity: i64,
}

/// One requested invoice line: which product, how many.
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Input for the invoice lifecycle's create operation.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub customer: CustomerDetails,
    pub lines: Vec<InvoiceLine>,
}

// =============================================================================
// Expense
// =============================================================================

/// Category of a business expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Vehicle,
    Maintenance,
    Fuel,
    Other,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 4] = [
        ExpenseType::Vehicle,
        ExpenseType::Maintenance,
        ExpenseType::Fuel,
        ExpenseType::Other,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Vehicle => "vehicle",
            ExpenseType::Maintenance => "maintenance",
            ExpenseType::Fuel => "fuel",
            ExpenseType::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ExpenseType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: ExpenseType::ALL.iter().map(|t| t.to_string()).collect(),
            })
    }
}

/// A recorded business expense. Independent of invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub amount_cents: i64,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for recording an expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub expense_type: ExpenseType,
    pub amount_cents: i64,
    pub description: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Detergent Powder 1kg".to_string(),
            name_si: None,
            price_cents: 120_000,
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_supply() {
        let p = product(50);
        assert!(p.can_supply(10));
        assert!(p.can_supply(50));
        assert!(!p.can_supply(51));
        assert!(!p.can_supply(0));
    }

    #[test]
    fn test_discount_rule_to_tier() {
        let rule = DiscountRule {
            id: "r-1".to_string(),
            min_amount_cents: 1_000_000,
            percentage_bps: 500,
        };
        let tier = rule.tier();
        assert_eq!(tier.min_amount, Money::from_major(10_000));
        assert_eq!(tier.rate.bps(), 500);
    }

    #[test]
    fn test_negative_percentage_clamps_to_zero() {
        let rule = DiscountRule {
            id: "r-1".to_string(),
            min_amount_cents: 0,
            percentage_bps: -100,
        };
        assert!(rule.tier().rate.is_zero());
    }

    #[test]
    fn test_expense_type_parse() {
        assert_eq!("fuel".parse::<ExpenseType>().unwrap(), ExpenseType::Fuel);
        assert_eq!(" Vehicle ".parse::<ExpenseType>().unwrap(), ExpenseType::Vehicle);
        assert!("groceries".parse::<ExpenseType>().is_err());
    }

    #[test]
    fn test_expense_serializes_type_field() {
        let expense = Expense {
            id: "e-1".to_string(),
            expense_type: ExpenseType::Maintenance,
            amount_cents: 250_000,
            description: Some("Brake pads".to_string()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["type"], "maintenance");
        assert_eq!(json["amountCents"], 250_000);
    }

    #[test]
    fn test_product_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            stock: Some(40),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        let clear = ProductPatch {
            name_si: Some(None),
            ..Default::default()
        };
        assert!(!clear.is_empty());
    }
}
