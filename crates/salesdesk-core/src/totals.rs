//! # Invoice Totals
//!
//! Combines invoice lines into subtotal, discount and total.
//!
//! ```text
//! lines ──► Σ unit_price × quantity ──► subtotal
//!                                          │
//!                       discount::select_discount(subtotal, tiers)
//!                                          │
//!                    total = max(subtotal − discount, 0)
//! ```
//!
//! All arithmetic is checked: an invoice that does not fit in i64 minor
//! units is rejected instead of wrapping.

use serde::{Deserialize, Serialize};

use crate::discount::select_discount;
use crate::error::{CoreError, CoreResult};
use crate::money::{DiscountRate, Money};
use crate::types::DiscountTier;

/// One priced line: unit price and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmount {
    pub unit_price: Money,
    pub quantity: i64,
}

impl LineAmount {
    pub const fn new(unit_price: Money, quantity: i64) -> Self {
        LineAmount {
            unit_price,
            quantity,
        }
    }

    /// Returns `unit_price × quantity`.
    pub fn total(&self) -> CoreResult<Money> {
        self.unit_price
            .checked_mul_quantity(self.quantity)
            .ok_or(CoreError::AmountOverflow("line total"))
    }
}

/// Computed totals for an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub discount_rate: DiscountRate,
    pub discount: Money,
    pub total: Money,
}

impl InvoiceTotals {
    /// Computes totals for `lines` against the discount `tiers`.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if a line total or the subtotal overflows.
    pub fn compute(lines: &[LineAmount], tiers: &[DiscountTier]) -> CoreResult<Self> {
        let mut subtotal = Money::zero();
        for line in lines {
            subtotal = subtotal
                .checked_add(line.total()?)
                .ok_or(CoreError::AmountOverflow("subtotal"))?;
        }

        let discount = select_discount(subtotal, tiers);

        Ok(InvoiceTotals {
            subtotal,
            discount_rate: discount.rate,
            discount: discount.amount,
            total: subtotal.saturating_sub_floor_zero(discount.amount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers() -> Vec<DiscountTier> {
        vec![
            DiscountTier::new(Money::from_major(5_000), 200),
            DiscountTier::new(Money::from_major(10_000), 500),
            DiscountTier::new(Money::from_major(25_000), 800),
            DiscountTier::new(Money::from_major(50_000), 1_000),
        ]
    }

    #[test]
    fn test_worked_example() {
        let lines = [LineAmount::new(Money::from_major(1_200), 10)];
        let totals = InvoiceTotals::compute(&lines, &tiers()).unwrap();

        assert_eq!(totals.subtotal, Money::from_major(12_000));
        assert_eq!(totals.discount_rate.bps(), 500);
        assert_eq!(totals.discount, Money::from_major(600));
        assert_eq!(totals.total, Money::from_major(11_400));
    }

    #[test]
    fn test_multiple_lines() {
        let lines = [
            LineAmount::new(Money::from_major(650), 4),
            LineAmount::new(Money::from_major(180), 5),
        ];
        let totals = InvoiceTotals::compute(&lines, &tiers()).unwrap();

        // 2600 + 900 = 3500, below the first tier
        assert_eq!(totals.subtotal, Money::from_major(3_500));
        assert!(totals.discount.is_zero());
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_empty_lines() {
        let totals = InvoiceTotals::compute(&[], &tiers()).unwrap();
        assert!(totals.subtotal.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_total_never_negative() {
        let lines = [LineAmount::new(Money::from_major(100), 1)];
        let generous = [DiscountTier::new(Money::zero(), 20_000)];
        let totals = InvoiceTotals::compute(&lines, &generous).unwrap();
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let lines = [LineAmount::new(Money::from_minor(i64::MAX), 2)];
        let err = InvoiceTotals::compute(&lines, &[]).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow("line total")));

        let lines = [
            LineAmount::new(Money::from_minor(i64::MAX), 1),
            LineAmount::new(Money::from_minor(1), 1),
        ];
        let err = InvoiceTotals::compute(&lines, &[]).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow("subtotal")));
    }
}
