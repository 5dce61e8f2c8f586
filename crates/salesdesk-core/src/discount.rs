//! # Discount Engine
//!
//! Selects the single discount percentage that applies to an order subtotal.
//!
//! ## Selection Rule
//! ```text
//! Rules (any order)            Sorted by min_amount DESC (stable)
//! ┌──────────────┐             ┌──────────────┐
//! │  5,000 →  2% │             │ 50,000 → 10% │  50,000 > 12,000  skip
//! │ 10,000 →  5% │   ──────►   │ 25,000 →  8% │  25,000 > 12,000  skip
//! │ 25,000 →  8% │             │ 10,000 →  5% │  10,000 ≤ 12,000  ◄── chosen
//! │ 50,000 → 10% │             │  5,000 →  2% │
//! └──────────────┘             └──────────────┘
//! ```
//!
//! Thresholds are inclusive. With no qualifying rule the rate is 0%. Rules
//! sharing a threshold resolve to the one that came first in the input.

use serde::{Deserialize, Serialize};

use crate::money::{DiscountRate, Money};
use crate::types::DiscountTier;

/// The outcome of discount selection for one subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub rate: DiscountRate,
    pub amount: Money,
}

impl Discount {
    pub const fn none() -> Self {
        Discount {
            rate: DiscountRate::zero(),
            amount: Money::zero(),
        }
    }
}

/// Returns the rate of the highest-threshold tier not exceeding `subtotal`.
pub fn applicable_rate(subtotal: Money, tiers: &[DiscountTier]) -> DiscountRate {
    let mut sorted: Vec<&DiscountTier> = tiers.iter().collect();
    // sort_by is stable, equal thresholds keep input order
    sorted.sort_by(|a, b| b.min_amount.cmp(&a.min_amount));

    sorted
        .into_iter()
        .find(|tier| tier.min_amount <= subtotal)
        .map(|tier| tier.rate)
        .unwrap_or_default()
}

/// Selects the rate and computes the discount amount, rounded half-up.
pub fn select_discount(subtotal: Money, tiers: &[DiscountTier]) -> Discount {
    if subtotal.is_negative() {
        return Discount::none();
    }
    let rate = applicable_rate(subtotal, tiers);
    Discount {
        rate,
        amount: subtotal.percent_of(rate),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
