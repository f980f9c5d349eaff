//! # Validation Module
//!
//! Input validation for the cart and checkout forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form                                              │
//! │  └── Immediate feedback while typing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout layer (Rust)                                        │
//! │  ├── Record ingestion (deserialization + ranges)                       │
//! │  └── THIS MODULE: quantities, promotion data, customer details         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Bookstore API                                                │
//! │  └── Final say on stock, prices and codes                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::validation::{validate_phone, validate_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_phone("0901234567").is_ok());
//! assert!(validate_phone("call me").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CustomerInfo;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PROMOTION_CODE_LEN, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 255;
const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Zero is allowed (free books exist)
/// - Must not be negative
/// - Must not exceed MAX_UNIT_PRICE
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price > Money::from_major(MAX_UNIT_PRICE) {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates cart size before adding another line.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Promotion Validators
// =============================================================================

/// Whether `percent` is a usable discount.
#[inline]
pub fn is_valid_discount_percent(percent: i64) -> bool {
    (1..=100).contains(&percent)
}

/// Validates a promotion record's discount.
///
/// Returns the percent narrowed to `u8` on success.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_discount_percent;
///
/// assert_eq!(validate_discount_percent("SALE10", 10).unwrap(), 10);
/// assert!(validate_discount_percent("BROKEN", 0).is_err());
/// assert!(validate_discount_percent("BROKEN", 101).is_err());
/// ```
pub fn validate_discount_percent(code: &str, percent: i64) -> CoreResult<u8> {
    if !is_valid_discount_percent(percent) {
        return Err(CoreError::InvalidDiscountRange {
            code: code.to_string(),
            percent,
        });
    }

    u8::try_from(percent).map_err(|_| CoreError::InvalidDiscountRange {
        code: code.to_string(),
        percent,
    })
}

/// Validates that a promotion window does not end before it starts.
pub fn validate_promotion_window(start: NaiveDate, end: NaiveDate) -> ValidationResult<()> {
    if end < start {
        return Err(ValidationError::InvalidFormat {
            field: "endDate".to_string(),
            reason: format!("ends {end} before it starts {start}"),
        });
    }

    Ok(())
}

/// Validates a shopper-entered promotion code before lookup.
///
/// The code is not trimmed; matching is exact.
pub fn validate_promotion_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "promotion code".to_string(),
        });
    }

    if code.chars().count() > MAX_PROMOTION_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "promotion code".to_string(),
            max: MAX_PROMOTION_CODE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Customer Validators
// =============================================================================

/// Validates the recipient's full name.
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    validate_required_text("full name", name, MAX_NAME_LEN)
}

/// Validates the shipping address.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    validate_required_text("address", address, MAX_ADDRESS_LEN)
}

/// Validates a phone number.
///
/// ## Rules
/// - Optional leading `+`
/// - Digits only after that, spaces ignored
/// - 9 to 15 digits
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if !digits.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    let count = digits.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&count) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!("must have {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"),
        });
    }

    Ok(())
}

/// Validates everything on the checkout form.
pub fn validate_customer(customer: &CustomerInfo) -> ValidationResult<()> {
    if customer.customer_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }
    validate_full_name(&customer.full_name)?;
    validate_phone(&customer.phone)?;
    validate_address(&customer.address)?;
    Ok(())
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
