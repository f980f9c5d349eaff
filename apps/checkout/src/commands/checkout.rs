//! # Checkout Commands
//!
//! Promotion codes, the checkout quote and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  1. LOAD PROMOTIONS ────────────────────────────────────────────────►   │
//! │     load_promotions(api, session) ──► ingest ──► PromotionState        │
//! │                                                                         │
//! │  2. ENTER CODE (optional) ──────────────────────────────────────────►   │
//! │     apply_promotion_code("SALE10") ──► redeem_code() ──► remembered    │
//! │                                                                         │
//! │  3. REVIEW ─────────────────────────────────────────────────────────►   │
//! │     quote(now) ──► code redeemed again, lapsed code dropped            │
//! │                                                                         │
//! │  4. PLACE ORDER ────────────────────────────────────────────────────►   │
//! │     place_order(api, session, form, now)                                │
//! │       compute_total ─► redeem_code ─► apply_discount                    │
//! │       ─► build_order_payload ─► submit_order ─► purchased lines go     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command that looks at dates takes `now` from the caller. The code
//! is redeemed again at each step, never cached as a matched promotion.

use bookstore_core::validation::{validate_customer, validate_promotion_code};
use bookstore_core::{
    apply_discount, build_order_payload, compute_total, redeem_code, CartTotals, CoreError,
    CustomerInfo, LineItem, Order, Promotion,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::gateway::BookstoreApi;
use crate::ingest::ingest_promotions;
use crate::state::{Cart, CartState, PromotionState, Session};

// =============================================================================
// Responses & Requests
// =============================================================================

/// What the checkout screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    /// Selected lines only.
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    /// The code that produced the discount, if any.
    pub promotion_code: Option<String>,
    pub discount_percent: u8,
}

impl CheckoutQuote {
    fn build(cart: &Cart, promotion: Option<&Promotion>) -> Self {
        CheckoutQuote {
            items: cart.selected_items(),
            totals: cart.totals(promotion),
            promotion_code: promotion.map(|p| p.code.clone()),
            discount_percent: promotion.map_or(0, |p| p.discount_percent),
        }
    }
}

/// Shipping and contact fields of the checkout form.
///
/// The customer id is never taken from the form; it comes from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub address: String,
}

impl CheckoutForm {
    fn into_customer(self, session: &Session) -> CustomerInfo {
        CustomerInfo {
            customer_id: session.customer_id().to_string(),
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self
                .email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            address: self.address.trim().to_string(),
        }
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// Fetches promotions and keeps the usable ones.
///
/// ## Returns
/// How many promotions were kept after ingestion
pub async fn load_promotions<A: BookstoreApi>(
    api: &A,
    session: &Session,
    promotions: &PromotionState,
    now: DateTime<Utc>,
) -> Result<usize, ApiError> {
    debug!(customer_id = %session.customer_id(), "load_promotions command");

    let records = api.fetch_promotions(session).await?;
    let usable = ingest_promotions(records);
    let count = usable.len();
    promotions.replace(usable, now);

    info!(count, "Promotions loaded");
    Ok(count)
}

/// Redeems a shopper-entered code and remembers it for the rest of checkout.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Promotion code: [ SALE10 ] (Apply)                                     │
/// │                      │                                                  │
/// │                      ▼                                                  │
/// │  exact match, active, in window, quantity left?                         │
/// │       │ yes                               │ no                          │
/// │       ▼                                   ▼                             │
/// │  quote with -10%                 INVALID_PROMOTION, previous code kept  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn apply_promotion_code<Tz: TimeZone>(
    cart: &CartState,
    promotions: &PromotionState,
    code: &str,
    now: &DateTime<Tz>,
) -> Result<CheckoutQuote, ApiError> {
    debug!(code = %code, "apply_promotion_code command");

    validate_promotion_code(code).map_err(CoreError::from)?;

    let promotion = promotions
        .with_promotions(|list, _| redeem_code(code, list, now).cloned())
        .inspect_err(|_| warn!(code = %code, "Promotion code rejected"))?;

    promotions.set_applied_code(code);
    Ok(cart.with_cart(|c| CheckoutQuote::build(c, Some(&promotion))))
}

/// Forgets the entered code.
pub fn clear_promotion_code(cart: &CartState, promotions: &PromotionState) -> CheckoutQuote {
    debug!("clear_promotion_code command");

    promotions.clear_applied_code();
    cart.with_cart(|c| CheckoutQuote::build(c, None))
}

/// Current checkout totals.
///
/// A remembered code that no longer applies at `now` is dropped.
pub fn quote<Tz: TimeZone>(
    cart: &CartState,
    promotions: &PromotionState,
    now: &DateTime<Tz>,
) -> CheckoutQuote {
    debug!("quote command");

    let promotion = current_promotion(promotions, now);
    cart.with_cart(|c| CheckoutQuote::build(c, promotion.as_ref()))
}

fn current_promotion<Tz: TimeZone>(
    promotions: &PromotionState,
    now: &DateTime<Tz>,
) -> Option<Promotion> {
    let (code, redeemed) = promotions.with_promotions(|list, code| {
        let code = code?.to_string();
        let redeemed = redeem_code(&code, list, now).ok().cloned();
        Some((code, redeemed))
    })?;

    if redeemed.is_none() {
        warn!(code = %code, "Promotion code no longer applies, dropping it");
        promotions.clear_applied_code();
    }
    redeemed
}

// =============================================================================
// Order Placement
// =============================================================================

/// Places an order for the selected lines.
///
/// ## Steps
/// 1. Validate the form, with the customer id taken from `session`
/// 2. Total the selected lines
/// 3. Redeem the remembered code again at `now`
/// 4. Apply the discount and assemble the payload
/// 5. Submit; on success remove the purchased lines and forget the code
///
/// ## Errors
/// - `UNAUTHORIZED` without a usable session
/// - `VALIDATION_ERROR` for a bad form
/// - `INVALID_PROMOTION` when the remembered code lapsed; the code is
///   forgotten so the next quote shows the full price
/// - `INCOMPLETE_ORDER` when nothing is selected
/// - `GATEWAY_ERROR` when submission fails; the cart is left untouched
pub async fn place_order<A, Tz>(
    api: &A,
    session: &Session,
    cart: &CartState,
    promotions: &PromotionState,
    form: CheckoutForm,
    now: &DateTime<Tz>,
) -> Result<Order, ApiError>
where
    A: BookstoreApi,
    Tz: TimeZone,
{
    debug!(customer_id = %session.customer_id(), "place_order command");

    if !session.is_authenticated() {
        return Err(ApiError::unauthorized());
    }

    let customer = form.into_customer(session);
    validate_customer(&customer).map_err(CoreError::from)?;

    let items = cart.with_cart(|c| c.selected_items());
    let raw_total = compute_total(&items);

    let promotion = match promotions.applied_code() {
        Some(code) => {
            let redeemed =
                promotions.with_promotions(|list, _| redeem_code(&code, list, now).cloned());
            match redeemed {
                Ok(promotion) => Some(promotion),
                Err(e) => {
                    warn!(code = %code, "Promotion code lapsed before order placement");
                    promotions.clear_applied_code();
                    return Err(e.into());
                }
            }
        }
        None => None,
    };

    let total_price = apply_discount(raw_total, promotion.as_ref());
    let payload = build_order_payload(
        &customer,
        &items,
        promotion.as_ref(),
        raw_total,
        total_price,
    )?;
    let mut order = Order::new(payload, now.with_timezone(&Utc));

    let receipt = api
        .submit_order(session, &order.payload)
        .await
        .inspect_err(|e| error!(order_id = %order.id, error = %e, "Order submission failed"))?;
    order.mark_submitted(receipt.order_id.clone())?;

    let ordered = order
        .payload
        .items
        .iter()
        .map(|line| (line.book_id.as_str(), line.quantity));
    let removed = cart.with_cart_mut(|c| c.remove_purchased(ordered));
    promotions.clear_applied_code();

    info!(
        order_id = %order.id,
        external_id = %receipt.order_id,
        raw_total = %order.payload.raw_total,
        total_price = %order.payload.total_price,
        lines_removed = removed,
        "Order placed"
    );

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart, set_item_selected};
    use crate::error::ErrorCode;
    use crate::ingest::PromotionRecord;
    use crate::test_support::FakeApi;
    use bookstore_core::{Book, Money, OrderStatus, PromotionStatus};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn sale10_record() -> PromotionRecord {
        PromotionRecord {
            id: "p1".to_string(),
            code: "SALE10".to_string(),
            discount_percent: 10,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            remaining_quantity: 5,
            status: PromotionStatus::Active,
            description: None,
        }
    }

    fn book(id: &str, price: i64) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {}", id),
            price: Money::from_major(price),
            stock: None,
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Nguyen Van A".to_string(),
            phone: "0901234567".to_string(),
            email: Some(" ".to_string()),
            address: "12 Le Loi, District 1".to_string(),
        }
    }

    /// Cart of scenario 1: 100000 x2 selected, 50000 x1 unselected.
    fn scenario_cart() -> CartState {
        let cart = CartState::new();
        add_to_cart(&cart, &book("b1", 100_000), Some(2)).unwrap();
        add_to_cart(&cart, &book("b2", 50_000), Some(1)).unwrap();
        set_item_selected(&cart, "b2", false).unwrap();
        cart
    }

    async fn loaded_promotions(api: &FakeApi) -> PromotionState {
        let promotions = PromotionState::new();
        load_promotions(api, &FakeApi::session(), &promotions, at(2024, 6, 1))
            .await
            .unwrap();
        promotions
    }

    #[tokio::test]
    async fn test_load_promotions_drops_bad_records() {
        let mut broken = sale10_record();
        broken.code = "BROKEN".to_string();
        broken.discount_percent = 120;
        let api = FakeApi::new().with_promotions(vec![sale10_record(), broken]);

        let promotions = PromotionState::new();
        let count = load_promotions(&api, &FakeApi::session(), &promotions, at(2024, 6, 1))
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(promotions.loaded_at(), Some(at(2024, 6, 1)));
    }

    #[tokio::test]
    async fn test_apply_code_in_window() {
        let api = FakeApi::new().with_promotions(vec![sale10_record()]);
        let promotions = loaded_promotions(&api).await;
        let cart = scenario_cart();

        let quote = apply_promotion_code(&cart, &promotions, "SALE10", &at(2024, 6, 1)).unwrap();

        assert_eq!(quote.items.len(), 1);
        assert_eq!(quote.totals.raw_total, Money::from_major(200_000));
        assert_eq!(quote.totals.discounted_total, Money::from_major(180_000));
        assert_eq!(quote.promotion_code.as_deref(), Some("SALE10"));
        assert_eq!(quote.discount_percent, 10);
        assert_eq!(promotions.applied_code().as_deref(), Some("SALE10"));
    }

    #[tokio::test]
    async fn test_bad_code_is_rejected_and_previous_kept() {
        let api = FakeApi::new().with_promotions(vec![sale10_record()]);
        let promotions = loaded_promotions(&api).await;
        let cart = scenario_cart();
        apply_promotion_code(&cart, &promotions, "SALE10", &at(2024, 6, 1)).unwrap();

        let err = apply_promotion_code(&cart, &promotions, "BADCODE", &at(2024, 6, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPromotion);
        assert_eq!(err.message, "Promotion code BADCODE is not valid");

        let err = apply_promotion_code(&cart, &promotions, "sale10", &at(2024, 6, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPromotion);

        let err = apply_promotion_code(&cart, &promotions, "  ", &at(2024, 6, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(promotions.applied_code().as_deref(), Some("SALE10"));
    }

    #[tokio::test]
    async fn test_expired_code_is_rejected() {
        let api = FakeApi::new().with_promotions(vec![sale10_record()]);
        let promotions = loaded_promotions(&api).await;
        let cart = scenario_cart();

        let err = apply_promotion_code(&cart, &promotions, "SALE10", &at(2025, 1, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPromotion);

        let quote = quote(&cart, &promotions, &at(2025, 1, 1));
        assert_eq!(quote.totals.discounted_total, Money::from_major(200_000));
    }

    #[tokio::test]
    async fn test_quote_drops_lapsed_code() {
        let api = FakeApi::new().with_promotions(vec![sale10_record()]);
        let promotions = loaded_promotions(&api).await;
        let cart = scenario_cart();
        apply_promotion_code(&cart, &promotions, "SALE10", &at(2024, 12, 31)).unwrap();

        let still = quote(&cart, &promotions, &at(2024, 12, 31));
        assert_eq!(still.totals.discounted_total, Money::from_major(180_000));

        let lapsed = quote(&cart, &promotions, &at(2025, 1, 1));
        assert_eq!(lapsed.promotion_code, None);
        assert_eq!(lapsed.totals.discounted_total, Money::from_major(200_000));
        assert_eq!(promotions.applied_code(), None);
    }

    #[tokio::test]
    async fn test_clear_promotion_code() {
        let api = FakeApi::new().with_promotions(vec![sale10_record()]);
        let promotions = loaded_promotions(&api).await;
        let cart = scenario_cart();
        apply_promotion_code(&cart, &promotions, "SALE10", &at(2024, 6, 1)).unwrap();

        let quote = clear_promotion_code(&cart, &promotions);
        assert_eq!(quote.discount_percent, 0);
        assert_eq!(quote.totals.discounted_total, Money::from_major(200_000));
    }

    #[tokio::test]
    async fn test_place_order_with_promotion() {
        let api = FakeApi::new().with_promotions(vec![sale10_record()]);
        let session = FakeApi::session();
        let promotions = loaded_promotions(&api).await;
        let cart = scenario_cart();
        apply_promotion_code(&cart, &promotions, "SALE10", &at(2024, 6, 1)).unwrap();

        let order = place_order(&api, &session, &cart, &promotions, form(), &at(2024, 6, 1))
            .await
            .unwrap();

        assert_eq!(
            order.status,
            OrderStatus::Submitted {
                external_id: "ORD-1".to_string()
            }
        );
        let payload = &order.payload;
        assert_eq!(payload.customer_id, session.customer_id());
        assert_eq!(payload.email, None);
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].total_price, Money::from_major(200_000));
        assert_eq!(payload.raw_total, Money::from_major(200_000));
        assert_eq!(payload.total_price, Money::from_major(180_000));
        assert_eq!(payload.promotion_code.as_deref(), Some("SALE10"));

        assert_eq!(api.submitted(), vec![order.payload.clone()]);

        let left = get_cart(&cart);
        assert_eq!(left.items.len(), 1);
        assert_eq!(left.items[0].book_id, "b2");
        assert_eq!(promotions.applied_code(), None);
    }

    #[tokio::test]
    async fn test_place_order_without_selection_is_incomplete() {
        let api = FakeApi::new();
        let cart = CartState::new();
        let promotions = PromotionState::new();

        let session = FakeApi::session();
        let err = place_order(&api, &session, &cart, &promotions, form(), &at(2024, 6, 1))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::IncompleteOrder);
        assert!(api.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_with_lapsed_code_fails() {
        let api = FakeApi::new().with_promotions(vec![sale10_record()]);
        let promotions = loaded_promotions(&api).await;
        let cart = scenario_cart();
        apply_promotion_code(&cart, &promotions, "SALE10", &at(2024, 6, 1)).unwrap();

        let session = FakeApi::session();
        let err = place_order(&api, &session, &cart, &promotions, form(), &at(2025, 1, 1))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidPromotion);
        assert_eq!(promotions.applied_code(), None);
        assert!(api.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_cart() {
        let api = FakeApi::new().unreachable();
        let cart = scenario_cart();
        let promotions = PromotionState::new();

        let session = FakeApi::session();
        let err = place_order(&api, &session, &cart, &promotions, form(), &at(2024, 6, 1))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::GatewayError);
        assert_eq!(get_cart(&cart).items.len(), 2);
    }

    #[tokio::test]
    async fn test_cart_changes_during_submission_survive() {
        let cart = scenario_cart();
        let in_flight = cart.clone();
        let api = FakeApi::new().on_submit(move || {
            add_to_cart(&in_flight, &book("b1", 100_000), Some(3)).unwrap();
            set_item_selected(&in_flight, "b1", false).unwrap();
        });
        let promotions = PromotionState::new();

        let session = FakeApi::session();
        let order = place_order(&api, &session, &cart, &promotions, form(), &at(2024, 6, 1))
            .await
            .unwrap();
        assert_eq!(order.payload.items[0].quantity, 2);

        let left: Vec<(String, i64)> = get_cart(&cart)
            .items
            .into_iter()
            .map(|i| (i.book_id, i.quantity))
            .collect();
        assert_eq!(left, vec![("b1".to_string(), 3), ("b2".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_place_order_checks_session_and_form() {
        let api = FakeApi::new();
        let cart = scenario_cart();
        let promotions = PromotionState::new();

        let anonymous = Session::new("cus-1", "");
        let err = place_order(&api, &anonymous, &cart, &promotions, form(), &at(2024, 6, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let mut bad = form();
        bad.phone = "12ab".to_string();
        let err = place_order(&api, &FakeApi::session(), &cart, &promotions, bad, &at(2024, 6, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(api.submitted().is_empty());
    }
}
