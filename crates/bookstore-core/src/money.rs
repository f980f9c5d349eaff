//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    199999 * 0.85 = 169999.15000000002  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimals                                           │
//! │    199999 - 199999 * 15 / 100 = 169999.15  (exact)                      │
//! │                                                                         │
//! │  Calculations never round. Rounding happens once, when a value is      │
//! │  formatted for display (see `Money::round_dp`).                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let price = Money::from_major(100_000);
//! let line_total = price * 2;
//! assert_eq!(line_total, Money::from_major(200_000));
//!
//! let discounted = line_total.apply_percentage_discount(10);
//! assert_eq!(discounted, Money::from_major(180_000));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the store currency's major unit.
///
/// ## Design Decisions
/// - **Decimal (not f64)**: percentage discounts stay exact
/// - **Signed**: a discount amount is just `raw - discounted`
/// - **Currency-less**: the storefront sells in a single currency, the
///   display layer owns the symbol and decimal places
///
/// ## Where Money Flows
/// ```text
/// Book.price ──► LineItem.unit_price ──► LineItem::line_total()
///                                              │
///                                              ▼
///                        cart::compute_total() = raw total
///                                              │
///                                              ▼
///                    discount::apply_discount() = discounted total
///                                              │
///                                              ▼
///                                 OrderPayload.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::from_major(50_000);
    /// assert_eq!(price.amount().to_string(), "50000");
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Creates a Money value from hundredths of the major unit.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.amount().to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact underlying amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Clamps negative amounts to zero.
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let unit_price = Money::from_major(100_000);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_major(200_000));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Returns `percent`% of this amount, unrounded.
    pub fn percentage(&self, percent: u8) -> Money {
        Money(self.0 * Decimal::from(percent) / Decimal::ONE_HUNDRED)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// Computes `amount - amount * percent / 100` exactly. The result is not
    /// rounded and is never negative.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let subtotal = Money::from_major(199_999);
    /// let discounted = subtotal.apply_percentage_discount(15);
    /// assert_eq!(discounted.amount().to_string(), "169999.15");
    /// ```
    pub fn apply_percentage_discount(&self, percent: u8) -> Money {
        (*self - self.percentage(percent)).clamp_non_negative()
    }

    /// Rounds to `decimals` places, midpoints away from zero.
    ///
    /// This is the display boundary. Never feed the result back into a
    /// calculation.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// let total = Money::from_cents(16999915).percentage(50); // 84999.575
    /// assert_eq!(total.round_dp(2).amount().to_string(), "84999.58");
    /// assert_eq!(total.round_dp(0).amount().to_string(), "85000");
    /// ```
    pub fn round_dp(&self, decimals: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the exact, unrounded amount.
///
/// ## Note
/// This is for debugging and logs. Use the checkout config's
/// `format_money` for anything a shopper sees.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_major(10).amount(), Decimal::from(10));
        assert_eq!(Money::from_cents(1099).amount(), Decimal::new(1099, 2));
        assert_eq!(Money::from_cents(1000), Money::from_major(10));
    }

    #[test]
    fn test_display_is_exact() {
        assert_eq!(Money::from_major(200_000).to_string(), "200000");
        assert_eq!(Money::from_cents(1050).to_string(), "10.5");
        assert_eq!(Money::from_major(-5).to_string(), "-5");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(1000);
        let b = Money::from_major(500);

        assert_eq!(a + b, Money::from_major(1500));
        assert_eq!(a - b, Money::from_major(500));
        assert_eq!(a * 3, Money::from_major(3000));

        let mut c = a;
        c += b;
        c -= Money::from_major(100);
        assert_eq!(c, Money::from_major(1400));
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_major(1), Money::from_major(2), Money::from_major(3)];
        let by_ref: Money = amounts.iter().sum();
        let by_val: Money = amounts.into_iter().sum();
        assert_eq!(by_ref, Money::from_major(6));
        assert_eq!(by_val, Money::from_major(6));

        let empty: Vec<Money> = Vec::new();
        assert!(empty.into_iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_major(200_000);
        assert_eq!(subtotal.apply_percentage_discount(10), Money::from_major(180_000));
        assert_eq!(subtotal.apply_percentage_discount(100), Money::zero());
        assert_eq!(subtotal.apply_percentage_discount(0), subtotal);
    }

    #[test]
    fn test_percentage_discount_keeps_fractions() {
        // No rounding inside the calculation
        let subtotal = Money::from_major(333);
        let discounted = subtotal.apply_percentage_discount(10);
        assert_eq!(discounted.amount(), Decimal::new(2997, 1)); // 299.7
    }

    #[test]
    fn test_percentage_discount_never_negative() {
        let subtotal = Money::from_major(100);
        assert_eq!(subtotal.apply_percentage_discount(250), Money::zero());
    }

    #[test]
    fn test_round_dp_midpoint_away_from_zero() {
        assert_eq!(Money::from_cents(250).round_dp(0), Money::from_major(3));
        assert_eq!(Money::from_cents(-250).round_dp(0), Money::from_major(-3));
        assert_eq!(Money::from_cents(249).round_dp(0), Money::from_major(2));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());
        assert_eq!(Money::default(), zero);

        let negative = Money::from_major(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.clamp_non_negative(), zero);
        assert_eq!(Money::from_major(5).clamp_non_negative(), Money::from_major(5));
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "\"10.99\"");

        let from_number: Money = serde_json::from_str("100000").unwrap();
        assert_eq!(from_number, Money::from_major(100_000));
    }
}
