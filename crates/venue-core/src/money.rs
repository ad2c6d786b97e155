//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Yen has no fractional subunit, so every amount is a whole i64.        │
//! │  Block multiplication and tax rounding are bit-exact on every          │
//! │  platform, and the same session always prices the same.                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use venue_core::money::Money;
//!
//! let set_price = Money::from_yen(3000);
//!
//! let doubled = set_price.checked_multiply_quantity(2);  // Some(¥6,000)
//! let total = set_price + Money::from_yen(1000);          // ¥4,000
//! assert_eq!(total.yen(), 4000);
//! assert_eq!(doubled.map(|m| m.to_string()).as_deref(), Some("¥6,000"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole yen.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for change and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer**: `{"amount": 3000}` in JSON
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Tariff prices ──► LineItem.amount ──► Quote.subtotal                   │
/// │                                             │                           │
/// │                                             ▼                           │
/// │                          Service tax ──► Quote.total ──► Payment.amount │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole yen.
    ///
    /// ## Example
    /// ```rust
    /// use venue_core::money::Money;
    ///
    /// let price = Money::from_yen(3000);
    /// assert_eq!(price.yen(), 3000);
    /// ```
    #[inline]
    pub const fn from_yen(yen: i64) -> Self {
        Money(yen)
    }

    /// Returns the value in yen.
    #[inline]
    pub const fn yen(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax, rounding half up.
    ///
    /// ## Implementation
    /// Integer math only: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use venue_core::money::Money;
    /// use venue_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_yen(3000);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(2000)); // 20%
    /// assert_eq!(tax.yen(), 600);
    ///
    /// // ¥1,003 × 8.25% = ¥82.7475 → ¥83
    /// let tax = Money::from_yen(1003).calculate_tax(TaxRate::from_bps(825));
    /// assert_eq!(tax.yen(), 83);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so amount * bps cannot overflow; a rate of at most 10000 bps
        // keeps the result within the amount itself.
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_yen(tax as i64)
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows yen with thousands separators, e.g. `¥12,000`.
///
/// ## Note
/// This is for receipts and logs. The checkout UI formats amounts itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}¥{}", sign, grouped)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yen() {
        let money = Money::from_yen(3000);
        assert_eq!(money.yen(), 3000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_yen(0).to_string(), "¥0");
        assert_eq!(Money::from_yen(600).to_string(), "¥600");
        assert_eq!(Money::from_yen(3600).to_string(), "¥3,600");
        assert_eq!(Money::from_yen(1234567).to_string(), "¥1,234,567");
        assert_eq!(Money::from_yen(-4800).to_string(), "-¥4,800");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_yen(1000);
        let b = Money::from_yen(500);

        assert_eq!((a + b).yen(), 1500);
        assert_eq!((a - b).yen(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_yen(200);
        assert_eq!(c.yen(), 1300);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_yen(3000), Money::from_yen(1000), Money::from_yen(2000)];
        let by_ref: Money = amounts.iter().sum();
        let by_value: Money = amounts.into_iter().sum();
        assert_eq!(by_ref.yen(), 6000);
        assert_eq!(by_value, by_ref);
    }

    #[test]
    fn test_tax_calculation_basic() {
        let rate = TaxRate::from_bps(2000);
        assert_eq!(Money::from_yen(3000).calculate_tax(rate).yen(), 600);
        assert_eq!(Money::from_yen(42000).calculate_tax(rate).yen(), 8400);
        assert_eq!(Money::zero().calculate_tax(rate).yen(), 0);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        let rate = TaxRate::from_bps(2000);
        // ¥1,002 × 20% = ¥200.4 → ¥200
        assert_eq!(Money::from_yen(1002).calculate_tax(rate).yen(), 200);
        // ¥1,003 × 20% = ¥200.6 → ¥201
        assert_eq!(Money::from_yen(1003).calculate_tax(rate).yen(), 201);
        // ¥10 × 5% = ¥0.5 → ¥1 (half rounds up)
        assert_eq!(Money::from_yen(10).calculate_tax(TaxRate::from_bps(500)).yen(), 1);
    }

    #[test]
    fn test_tax_on_large_amount_does_not_overflow() {
        let big = Money::from_yen(i64::MAX / 2);
        let tax = big.calculate_tax(TaxRate::from_bps(10000));
        assert_eq!(tax, big);
    }

    #[test]
    fn test_checked_operations() {
        let price = Money::from_yen(1000);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_yen(3000)));
        assert_eq!(price.checked_multiply_quantity(i64::MAX), None);
        assert_eq!(Money::from_yen(i64::MAX).checked_add(price), None);
        assert_eq!(price.checked_add(price), Some(Money::from_yen(2000)));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_yen(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().yen(), 100);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_yen(3600)).unwrap();
        assert_eq!(json, "3600");
        let back: Money = serde_json::from_str("3600").unwrap();
        assert_eq!(back.yen(), 3600);
    }
}
