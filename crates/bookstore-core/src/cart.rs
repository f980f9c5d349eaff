//! # Cart Aggregation
//!
//! Reduces a list of line items into totals.
//!
//! ## Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CART                                                                   │
//! │                                                                         │
//! │  [x] Dune                 100,000 × 2      200,000   ──► counted        │
//! │  [ ] Neuromancer           50,000 × 1       50,000   ──► skipped        │
//! │  ───────────────────────────────────────────────────                    │
//! │  Raw total                                 200,000                      │
//! │  SALE10 (-10%)                             -20,000                      │
//! │  Total                                     180,000                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deselected lines stay in the cart; they are only skipped when summing.
//! Nothing here validates quantities or prices.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::apply_discount;
use crate::money::Money;
use crate::types::{LineItem, Promotion};

/// Iterates over the lines the shopper has ticked for checkout.
pub fn selected_items(items: &[LineItem]) -> impl Iterator<Item = &LineItem> {
    items.iter().filter(|item| item.selected)
}

/// Sums `line_total` over selected items.
///
/// ## Example
/// ```rust
/// use bookstore_core::cart::compute_total;
/// use bookstore_core::{LineItem, Money};
///
/// let items = vec![
///     LineItem {
///         book_id: "b1".into(),
///         title: "Dune".into(),
///         unit_price: Money::from_major(100_000),
///         quantity: 2,
///         selected: true,
///     },
///     LineItem {
///         book_id: "b2".into(),
///         title: "Neuromancer".into(),
///         unit_price: Money::from_major(50_000),
///         quantity: 1,
///         selected: false,
///     },
/// ];
/// assert_eq!(compute_total(&items), Money::from_major(200_000));
/// assert_eq!(compute_total(&[]), Money::zero());
/// ```
pub fn compute_total(items: &[LineItem]) -> Money {
    selected_items(items).map(LineItem::line_total).sum()
}

/// Cart summary shown beside the cart and on the checkout screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Lines in the cart, selected or not.
    pub item_count: usize,
    pub selected_count: usize,
    /// Sum of quantities over selected lines.
    pub selected_quantity: i64,
    pub raw_total: Money,
    pub discount_amount: Money,
    pub discounted_total: Money,
}

impl CartTotals {
    /// Computes every total in one pass over the discount rules.
    pub fn compute(items: &[LineItem], promotion: Option<&Promotion>) -> Self {
        let raw_total = compute_total(items);
        let discounted_total = apply_discount(raw_total, promotion);

        CartTotals {
            item_count: items.len(),
            selected_count: selected_items(items).count(),
            selected_quantity: selected_items(items).map(|i| i.quantity).sum(),
            raw_total,
            discount_amount: raw_total - discounted_total,
            discounted_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
