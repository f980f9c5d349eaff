//! # API Boundary Ingestion
//!
//! Converts wire records from the bookstore API into typed domain values.
//!
//! ```text
//! ┌──────────────────┐    TryFrom     ┌──────────────┐
//! │ PromotionRecord  │ ─────────────► │  Promotion   │
//! │ (camelCase JSON) │                │  (validated) │
//! └──────────────────┘                └──────────────┘
//! ┌──────────────────┐    TryFrom     ┌──────────────┐
//! │ CartItemRecord   │ ─────────────► │  LineItem    │
//! └──────────────────┘                └──────────────┘
//! ```
//!
//! A single bad record never fails a whole list: it is logged with `warn!`
//! and left out. A promotion with a discount outside 1..=100 therefore never
//! reaches the validator at all.

use bookstore_core::validation::{
    validate_discount_percent, validate_price, validate_promotion_window, validate_quantity,
};
use bookstore_core::{
    CoreError, CoreResult, LineItem, Money, Promotion, PromotionStatus, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::gateway::GatewayError;

// =============================================================================
// Promotions
// =============================================================================

/// A promotion exactly as the API sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRecord {
    pub id: String,
    pub code: String,
    /// Unchecked; may be anything the back office typed.
    pub discount_percent: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(alias = "quantity")]
    pub remaining_quantity: i64,
    pub status: PromotionStatus,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<PromotionRecord> for Promotion {
    type Error = CoreError;

    fn try_from(record: PromotionRecord) -> CoreResult<Self> {
        let discount_percent = validate_discount_percent(&record.code, record.discount_percent)?;
        validate_promotion_window(record.start_date, record.end_date)?;

        Ok(Promotion {
            id: record.id,
            code: record.code,
            discount_percent,
            start_date: record.start_date,
            end_date: record.end_date,
            remaining_quantity: record.remaining_quantity,
            status: record.status,
            description: record.description,
        })
    }
}

/// Converts fetched records, dropping the ones that cannot be used.
pub fn ingest_promotions(records: Vec<PromotionRecord>) -> Vec<Promotion> {
    let total = records.len();
    let promotions: Vec<Promotion> = records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match Promotion::try_from(record) {
                Ok(promotion) => Some(promotion),
                Err(e) => {
                    warn!(promotion_id = %id, error = %e, "Dropping promotion record");
                    None
                }
            }
        })
        .collect();

    debug!(total, kept = promotions.len(), "Promotions ingested");
    promotions
}

/// Parses a JSON array of promotion records and ingests it.
pub fn parse_promotions(json: &str) -> Result<Vec<Promotion>, GatewayError> {
    let records: Vec<PromotionRecord> = serde_json::from_str(json)?;
    Ok(ingest_promotions(records))
}

// =============================================================================
// Cart Items
// =============================================================================

/// A server-side cart line as the API sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRecord {
    /// Missing when the book was deleted from the catalog.
    #[serde(default)]
    pub book_id: Option<String>,
    pub title: String,
    pub price: Money,
    pub quantity: i64,
    #[serde(default = "selected_by_default")]
    pub selected: bool,
}

fn selected_by_default() -> bool {
    true
}

impl TryFrom<CartItemRecord> for LineItem {
    type Error = CoreError;

    fn try_from(record: CartItemRecord) -> CoreResult<Self> {
        let book_id = record
            .book_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ValidationError::Required {
                field: "bookId".to_string(),
            })?;
        validate_quantity(record.quantity)?;
        validate_price(record.price)?;

        Ok(LineItem {
            book_id,
            title: record.title,
            unit_price: record.price,
            quantity: record.quantity,
            selected: record.selected,
        })
    }
}

/// Converts a fetched cart, dropping lines that cannot be checked out.
pub fn ingest_cart(records: Vec<CartItemRecord>) -> Vec<LineItem> {
    let total = records.len();
    let items: Vec<LineItem> = records
        .into_iter()
        .filter_map(|record| {
            let title = record.title.clone();
            match LineItem::try_from(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(title = %title, error = %e, "Dropping cart record");
                    None
                }
            }
        })
        .collect();

    debug!(total, kept = items.len(), "Cart ingested");
    items
}
