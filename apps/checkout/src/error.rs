//! # API Error Type
//!
//! The one error type every checkout command returns.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Checkout                               │
//! │                                                                         │
//! │  Storefront                  Checkout commands                          │
//! │  ──────────                  ─────────────────                          │
//! │                                                                         │
//! │  applyPromotionCode('X')                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Gateway Error? ─── GatewayError::Transport(..) ───┐            │  │
//! │  │         │                                          │            │  │
//! │  │  Business rule? ─── CoreError::InvalidPromotionCode ─► ApiError ►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INVALID_PROMOTION"                                      │
//! │    // e.message = "Promotion code X is not valid"                       │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bookstore_core::CoreError;
use serde::Serialize;

use crate::gateway::GatewayError;
use crate::state::ConfigError;

/// Error returned from checkout commands.
///
/// Serialized for the storefront as:
/// ```json
/// {
///   "code": "INVALID_PROMOTION",
///   "message": "Promotion code BADCODE is not valid"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message safe to show the shopper
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced item does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Promotion code cannot be redeemed; the shopper may re-enter it
    InvalidPromotion,

    /// Order cannot be assembled; submission blocked
    IncompleteOrder,

    /// Cart limit reached or stock exhausted
    CartError,

    /// Bookstore API failed or rejected the request
    GatewayError,

    /// Session missing or expired
    Unauthorized,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    pub fn unauthorized() -> Self {
        ApiError::new(ErrorCode::Unauthorized, "Please sign in again")
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPromotionCode { .. } => {
                ApiError::new(ErrorCode::InvalidPromotion, err.to_string())
            }
            CoreError::IncompleteOrder(_) => {
                ApiError::new(ErrorCode::IncompleteOrder, err.to_string())
            }
            CoreError::InvalidDiscountRange { code, percent } => {
                tracing::error!(%code, percent, "Promotion with invalid discount reached checkout");
                ApiError::new(
                    ErrorCode::InvalidPromotion,
                    format!("Promotion code {} is not valid", code),
                )
            }
            CoreError::BookNotInCart(id) => ApiError::not_found("Book in cart", &id),
            CoreError::InsufficientStock { .. } | CoreError::CartTooLarge { .. } => {
                ApiError::cart(err.to_string())
            }
            CoreError::QuantityTooLarge { .. } => ApiError::validation(err.to_string()),
            CoreError::OrderAlreadySubmitted { external_id } => {
                tracing::error!(%external_id, "Order submitted twice");
                ApiError::internal("Order was already placed")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts gateway errors to API errors.
impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized => ApiError::unauthorized(),
            GatewayError::Rejected { status, message } => {
                tracing::error!(status, %message, "Bookstore API rejected request");
                ApiError::new(ErrorCode::GatewayError, "The bookstore rejected the request")
            }
            GatewayError::Transport(e) => {
                tracing::error!("Bookstore API unreachable: {}", e);
                ApiError::new(ErrorCode::GatewayError, "The bookstore is unreachable")
            }
            GatewayError::Decode(e) => {
                tracing::error!("Malformed bookstore API response: {}", e);
                ApiError::new(ErrorCode::GatewayError, "Unexpected response from the bookstore")
            }
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::internal("Checkout is misconfigured")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
