//! # Domain Types
//!
//! Core domain types used throughout the checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    LineItem     │   │   Promotion     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  book_id        │   │  code           │       │
//! │  │  title          │   │  unit_price     │   │  discount_%     │       │
//! │  │  price          │   │  quantity       │   │  start..end     │       │
//! │  └─────────────────┘   │  selected       │   │  remaining_qty  │       │
//! │                        └─────────────────┘   │  status         │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CustomerInfo   │   │  OrderPayload   │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  customer_id    │──►│  items          │──►│  id (UUID)      │       │
//! │  │  name / phone   │   │  raw_total      │   │  payload        │       │
//! │  │  address        │   │  total_price    │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Promotions, books and carts are owned by the remote bookstore API. The
//! client only reads them; the one object with a client-side lifecycle is
//! the [`Order`] being checked out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// A catalog entry as fetched from the bookstore API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub price: Money,
    /// Units in stock, when the API reports it.
    pub stock: Option<i64>,
}

impl Book {
    /// Checks if `quantity` units can be put in a cart.
    pub fn can_order(&self, quantity: i64) -> bool {
        match self.stock {
            Some(stock) => stock >= quantity,
            None => true,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One book entry in a cart or order.
///
/// The unit price is frozen when the book is added, so later catalog price
/// changes do not move an in-progress checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Book identifier. Blank means the line cannot be ordered.
    pub book_id: String,
    pub title: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Only selected lines are paid for at checkout.
    pub selected: bool,
}

impl LineItem {
    /// Creates a selected line item from a catalog book.
    pub fn from_book(book: &Book, quantity: i64) -> Self {
        LineItem {
            book_id: book.id.clone(),
            title: book.title.clone(),
            unit_price: book.price,
            quantity,
            selected: true,
        }
    }

    /// Line total (unit price × quantity), undiscounted.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether the line references a book the API can resolve.
    #[inline]
    pub fn has_book(&self) -> bool {
        !self.book_id.trim().is_empty()
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// Whether a promotion is switched on by the back office.
///
/// Stored and transferred as an integer: `0` inactive, `1` active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PromotionStatus {
    #[default]
    Inactive,
    Active,
}

impl TryFrom<u8> for PromotionStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PromotionStatus::Inactive),
            1 => Ok(PromotionStatus::Active),
            other => Err(format!("invalid promotion status {other}, expected 0 or 1")),
        }
    }
}

impl From<PromotionStatus> for u8 {
    fn from(status: PromotionStatus) -> Self {
        match status {
            PromotionStatus::Inactive => 0,
            PromotionStatus::Active => 1,
        }
    }
}

/// A percentage-off promotion code.
///
/// Read-only on the client. The back office changes status and remaining
/// quantity; the client re-fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    /// Case-sensitive code as stored.
    pub code: String,
    /// Percent off the order total, 1..=100 for well-formed records.
    pub discount_percent: u8,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    /// Last day on which the code is valid (inclusive).
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    /// Redemptions left.
    pub remaining_quantity: i64,
    #[ts(as = "u8")]
    pub status: PromotionStatus,
    pub description: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// Shipping and contact details entered on the checkout form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub customer_id: String,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
}

// =============================================================================
// Order Payload
// =============================================================================

/// One line of a submitted order. `total_price` is undiscounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub book_id: String,
    pub quantity: i64,
    pub total_price: Money,
}

/// The body handed to the order-creation endpoint.
///
/// Carries both totals: `raw_total` before the promotion and `total_price`
/// after it. The discount only ever applies at this level, never per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub customer_id: String,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub items: Vec<OrderLinePayload>,
    pub promotion_code: Option<String>,
    /// 0 when no promotion applies.
    pub discount_percent: u8,
    pub raw_total: Money,
    pub total_price: Money,
}

// =============================================================================
// Order
// =============================================================================

/// Client-side lifecycle of an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum OrderStatus {
    /// Assembled, not yet accepted by the API.
    #[default]
    Built,
    /// Accepted by the API. Everything after this is server-owned.
    Submitted {
        /// Identifier assigned by the order-creation endpoint.
        external_id: String,
    },
}

/// An order being checked out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[ts(as = "String")]
    pub id: Uuid,
    pub payload: OrderPayload,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Wraps an assembled payload as a freshly built order.
    pub fn new(payload: OrderPayload, created_at: DateTime<Utc>) -> Self {
        Order {
            id: Uuid::new_v4(),
            payload,
            created_at,
            status: OrderStatus::Built,
        }
    }

    /// Records acceptance by the order-creation endpoint.
    ///
    /// Fails if the order was already submitted; a submitted order is
    /// immutable.
    pub fn mark_submitted(&mut self, external_id: impl Into<String>) -> CoreResult<()> {
        if let OrderStatus::Submitted { external_id } = &self.status {
            return Err(CoreError::OrderAlreadySubmitted {
                external_id: external_id.clone(),
            });
        }
        self.status = OrderStatus::Submitted {
            external_id: external_id.into(),
        };
        Ok(())
    }

    /// Checks if the API has accepted the order.
    pub fn is_submitted(&self) -> bool {
        matches!(self.status, OrderStatus::Submitted { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
