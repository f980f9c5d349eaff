//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - Checkout rule violations                       │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  bookstore-checkout errors (app crate)                                 │
//! │  ├── GatewayError     - Remote API failures                            │
//! │  └── ApiError         - What the storefront sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Storefront             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable at the call boundary. None of them
//! should take down the hosting page.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Checkout business rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The entered code matches no currently applicable promotion.
    ///
    /// ## User Workflow
    /// ```text
    /// Shopper types "BADCODE" ──► redeem_code() ──► InvalidPromotionCode
    ///                                                     │
    ///                                                     ▼
    ///                        "Promotion code BADCODE is not valid", re-enter
    /// ```
    #[error("Promotion code {code} is not valid")]
    InvalidPromotionCode { code: String },

    /// An order cannot be assembled from the given lines. Blocks submission.
    #[error("Order is incomplete: {0}")]
    IncompleteOrder(IncompleteOrderReason),

    /// A promotion record carries a discount outside 1..=100.
    ///
    /// Data integrity problem on the API side. The record is logged and
    /// never applied.
    #[error("Promotion {code} has discount {percent}% outside 1-100")]
    InvalidDiscountRange { code: String, percent: i64 },

    /// Book is not in the cart.
    #[error("Book not in cart: {0}")]
    BookNotInCart(String),

    /// Not enough stock for the requested quantity.
    #[error("Only {available} of {title} left, requested {requested}")]
    InsufficientStock {
        title: String,
        available: i64,
        requested: i64,
    },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The order was already accepted by the API.
    #[error("Order already submitted as {external_id}")]
    OrderAlreadySubmitted { external_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Why an order payload could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IncompleteOrderReason {
    #[error("no items selected")]
    NoLineItems,

    /// `line` is the zero-based position in the submitted line list.
    #[error("line {line} has no book")]
    MissingBookId { line: usize },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when checkout form input doesn't meet requirements.
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

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is larger than anything the store sells.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Invalid format (e.g., malformed phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
