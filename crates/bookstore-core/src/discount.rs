//! # Discount Calculation
//!
//! Applies a redeemed promotion to an order's raw total.
//!
//! The discount is a percentage of the whole order. Line items keep their
//! full price; only the grand total moves.

use crate::money::Money;
use crate::types::Promotion;

/// Returns the total after `promotion`, or `raw_total` unchanged without one.
///
/// Computes `raw_total - raw_total * discount_percent / 100` exactly and
/// clamps to zero. The result is not rounded.
///
/// ## Example
/// ```rust
/// use bookstore_core::discount::apply_discount;
/// use bookstore_core::Money;
///
/// let raw = Money::from_major(200_000);
/// assert_eq!(apply_discount(raw, None), raw);
/// ```
pub fn apply_discount(raw_total: Money, promotion: Option<&Promotion>) -> Money {
    match promotion {
        Some(promo) => raw_total.apply_percentage_discount(promo.discount_percent),
        None => raw_total,
    }
}

/// How much `promotion` takes off `raw_total`.
pub fn discount_amount(raw_total: Money, promotion: Option<&Promotion>) -> Money {
    raw_total - apply_discount(raw_total, promotion)
}

// =============================================================================
// Unit Tests
// =============================================================================
