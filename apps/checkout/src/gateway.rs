//! # Bookstore API Gateway
//!
//! The seam between checkout and the remote bookstore REST API.
//!
//! ```text
//! ┌───────────────────────┐                 ┌──────────────────────────────┐
//! │  commands::checkout   │  &Session       │  BookstoreApi impl           │
//! │  commands::cart       │ ──────────────► │  (HTTP client, lives in the  │
//! │                       │  OrderPayload   │   host application)          │
//! │                       │ ◄────────────── │                              │
//! │                       │  records        │                              │
//! └───────────────────────┘                 └──────────────────────────────┘
//! ```
//!
//! Implementations return wire records as the API sent them. Turning those
//! into domain types is [`ingest`](crate::ingest)'s job, so every transport
//! gets the same validation.
//!
//! Every call receives the [`Session`] explicitly.

use bookstore_core::OrderPayload;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::{CartItemRecord, PromotionRecord};
use crate::state::Session;

/// Operations checkout needs from the bookstore API.
pub trait BookstoreApi {
    /// Lists promotions visible to the shopper.
    async fn fetch_promotions(
        &self,
        session: &Session,
    ) -> Result<Vec<PromotionRecord>, GatewayError>;

    /// Lists the shopper's server-side cart.
    async fn fetch_cart(&self, session: &Session) -> Result<Vec<CartItemRecord>, GatewayError>;

    /// Submits an order to the order-creation endpoint.
    async fn submit_order(
        &self,
        session: &Session,
        payload: &OrderPayload,
    ) -> Result<OrderReceipt, GatewayError>;
}

/// What the order-creation endpoint returns on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
}

/// Remote API failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Token missing, expired or rejected.
    #[error("Session is not authorized")]
    Unauthorized,

    /// The API answered with an error status.
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The answer could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
