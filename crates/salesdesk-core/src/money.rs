//! # Money Module
//!
//! Provides the `Money` type for monetary values and `DiscountRate` for
//! order-level percentages.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The mobile client sums invoice lines in JavaScript:                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Repeated additions over a 40-line invoice drift further.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (cents)                              │
//! │    LKR 1,200.00 = 120000 minor units                                    │
//! │    Sums are exact, rounding happens once, at the discount               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salesdesk_core::money::{DiscountRate, Money};
//!
//! let price = Money::from_minor(120_000); // 1,200.00
//! let line = price.checked_mul_quantity(10).unwrap();
//! assert_eq!(line, Money::from_major(12_000));
//!
//! let discount = line.percent_of(DiscountRate::from_bps(500)); // 5%
//! assert_eq!(discount, Money::from_major(600));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

/// Number of minor units in one major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Basis points in 100%.
pub const BPS_PER_WHOLE: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (client vs server totals) can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a bare integer**: the wire format is minor units
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► InvoiceItem.unit_price (snapshot) ──► line_total
///                                                                  │
///                          Σ line_total ──► subtotal ──► discount ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// let price = Money::from_minor(65_000); // 650.00
    /// assert_eq!(price.minor(), 65_000);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from a whole number of major units.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(12).minor(), 1_200);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit remainder (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// let unit = Money::from_minor(18_000);
    /// assert_eq!(unit.checked_mul_quantity(3), Some(Money::from_minor(54_000)));
    /// assert_eq!(Money::from_minor(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two values, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// Invoice totals are never negative even if a discount would exceed
    /// the subtotal.
    #[inline]
    pub fn saturating_sub_floor_zero(&self, other: Money) -> Self {
        Money((self.0 - other.0).max(0))
    }

    /// Returns `rate` percent of this amount, rounded half-up to the minor unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// i128 keeps large wholesale invoices from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::{DiscountRate, Money};
    ///
    /// // 2% of 5,000.25 = 100.005 → 100.01
    /// let amount = Money::from_minor(500_025);
    /// assert_eq!(amount.percent_of(DiscountRate::from_bps(200)).minor(), 10_001);
    /// ```
    pub fn percent_of(&self, rate: DiscountRate) -> Money {
        let half = (BPS_PER_WHOLE / 2) as i128;
        let minor = (self.0 as i128 * rate.bps() as i128 + half) / BPS_PER_WHOLE as i128;
        Money(minor as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `major.minor` with a thousands separator, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.major().abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "{}{}.{:02}", sign, grouped, self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// An order-level discount percentage in basis points.
///
/// 1 basis point = 0.01%, so 500 bps = 5%. Rates of 2.5% are representable
/// without floats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
