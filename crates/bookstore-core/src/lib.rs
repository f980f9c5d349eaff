//! # bookstore-core: Pure Checkout Logic for the Bookstore Storefront
//!
//! This crate holds the only real business rules of the storefront: cart
//! totals, promotion codes, percentage discounts and order assembly. Every
//! function is pure with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bookstore Storefront                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront SPA                               │   │
//! │  │    Cart screen ──► Promotion code ──► Checkout form             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             bookstore-checkout (commands, state, API)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌───────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │  │   cart   │ │ promotion │ │ discount │ │  order   │          │   │
//! │  │  │ totals   │ │ validity  │ │ % off    │ │ payload  │          │   │
//! │  │  └──────────┘ └───────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, LineItem, Promotion, Order, etc.)
//! - [`money`] - Exact decimal money
//! - [`cart`] - Totals over selected line items
//! - [`promotion`] - Promotion applicability and code lookup
//! - [`discount`] - Percentage discount on the order total
//! - [`order`] - Order payload assembly
//! - [`validation`] - Form and record validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::{cart, discount, promotion};
//! use bookstore_core::{LineItem, Money, Promotion, PromotionStatus};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let items = vec![LineItem {
//!     book_id: "b1".into(),
//!     title: "Dune".into(),
//!     unit_price: Money::from_major(100_000),
//!     quantity: 2,
//!     selected: true,
//! }];
//! let promos = vec![Promotion {
//!     id: "p1".into(),
//!     code: "SALE10".into(),
//!     discount_percent: 10,
//!     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//!     remaining_quantity: 5,
//!     status: PromotionStatus::Active,
//!     description: None,
//! }];
//! let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
//!
//! let raw = cart::compute_total(&items);
//! let promo = promotion::redeem_code("SALE10", &promos, &now).unwrap();
//! assert_eq!(discount::apply_discount(raw, Some(promo)), Money::from_major(180_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod order;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{compute_total, CartTotals};
pub use discount::apply_discount;
pub use error::{CoreError, CoreResult, IncompleteOrderReason, ValidationError};
pub use money::Money;
pub use order::build_order_payload;
pub use promotion::{find_applicable, is_applicable, redeem_code, Inapplicable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single book in a cart.
///
/// ## Business Reason
/// Catches typos like 100 instead of 10 before they reach the order API.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price accepted, in major currency units.
///
/// Keeps every cart and order total far inside `Decimal` range, so line and
/// order arithmetic cannot overflow.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;

/// Longest promotion code the checkout form accepts.
pub const MAX_PROMOTION_CODE_LEN: usize = 50;
