//! # Order Assembly
//!
//! Packages customer details, line items and the redeemed promotion into the
//! body for the order-creation endpoint.
//!
//! ## Checkout Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  cart::compute_total ──► promotion::redeem_code ──► discount::apply     │
//! │          │                        │                        │            │
//! │       raw_total               Promotion              discounted_total   │
//! │          └────────────────────────┼────────────────────────┘            │
//! │                                   ▼                                     │
//! │                    order::build_order_payload  ◄── THIS MODULE          │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                     OrderPayload ──► (caller submits it)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Assembly is pure: same inputs, same payload. Order ids and timestamps are
//! added later by [`Order::new`](crate::types::Order::new).

use crate::error::{CoreError, CoreResult, IncompleteOrderReason};
use crate::money::Money;
use crate::types::{CustomerInfo, LineItem, OrderLinePayload, OrderPayload, Promotion};

/// Builds the order-creation payload.
///
/// Each line keeps its full, undiscounted `unit_price * quantity`. Both totals
/// travel with the payload so the receiving side can use either.
///
/// ## Errors
/// - `IncompleteOrder(NoLineItems)` when `line_items` is empty
/// - `IncompleteOrder(MissingBookId { line })` when a line has a blank book id
pub fn build_order_payload(
    customer: &CustomerInfo,
    line_items: &[LineItem],
    promotion: Option<&Promotion>,
    raw_total: Money,
    discounted_total: Money,
) -> CoreResult<OrderPayload> {
    if line_items.is_empty() {
        return Err(CoreError::IncompleteOrder(IncompleteOrderReason::NoLineItems));
    }

    let items = line_items
        .iter()
        .enumerate()
        .map(|(line, item)| {
            if !item.has_book() {
                return Err(CoreError::IncompleteOrder(
                    IncompleteOrderReason::MissingBookId { line },
                ));
            }
            Ok(OrderLinePayload {
                book_id: item.book_id.clone(),
                quantity: item.quantity,
                total_price: item.line_total(),
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(OrderPayload {
        customer_id: customer.customer_id.clone(),
        full_name: customer.full_name.clone(),
        phone: customer.phone.clone(),
        email: customer.email.clone(),
        address: customer.address.clone(),
        items,
        promotion_code: promotion.map(|p| p.code.clone()),
        discount_percent: promotion.map_or(0, |p| p.discount_percent),
        raw_total,
        total_price: discounted_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::compute_total;
    use crate::discount::apply_discount;
    use crate::types::PromotionStatus;
    use chrono::NaiveDate;

    fn customer() -> CustomerInfo {
        CustomerInfo {
            customer_id: "cus-1".to_string(),
            full_name: "Tran Thi B".to_string(),
            phone: "0912345678".to_string(),
            email: Some("b@example.com".to_string()),
            address: "12 Nguyen Hue, District 1".to_string(),
        }
    }

    fn item(book_id: &str, price: i64, quantity: i64) -> LineItem {
        LineItem {
            book_id: book_id.to_string(),
            title: format!("Book {}", book_id),
            unit_price: Money::from_major(price),
            quantity,
            selected: true,
        }
    }

    fn sale10() -> Promotion {
        Promotion {
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

    #[test]
    fn test_empty_order_is_incomplete() {
        let err = build_order_payload(&customer(), &[], None, Money::zero(), Money::zero())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::IncompleteOrder(IncompleteOrderReason::NoLineItems)
        ));
    }

    #[test]
    fn test_missing_book_id_is_incomplete() {
        let items = vec![item("b1", 10_000, 1), item("", 20_000, 1)];
        let raw = compute_total(&items);
        let err = build_order_payload(&customer(), &items, None, raw, raw).unwrap_err();
        assert!(matches!(
            err,
            CoreError::IncompleteOrder(IncompleteOrderReason::MissingBookId { line: 1 })
        ));
    }

    #[test]
    fn test_lines_keep_full_price() {
        let items = vec![item("b1", 100_000, 2), item("b2", 50_000, 1)];
        let promo = sale10();
        let raw = compute_total(&items);
        let discounted = apply_discount(raw, Some(&promo));

        let payload =
            build_order_payload(&customer(), &items, Some(&promo), raw, discounted).unwrap();

        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[0].book_id, "b1");
        assert_eq!(payload.items[0].quantity, 2);
        assert_eq!(payload.items[0].total_price, Money::from_major(200_000));
        assert_eq!(payload.items[1].total_price, Money::from_major(50_000));

        assert_eq!(payload.promotion_code.as_deref(), Some("SALE10"));
        assert_eq!(payload.discount_percent, 10);
        assert_eq!(payload.raw_total, Money::from_major(250_000));
        assert_eq!(payload.total_price, Money::from_major(225_000));
    }

    #[test]
    fn test_customer_details_copied() {
        let items = vec![item("b1", 10_000, 1)];
        let raw = compute_total(&items);
        let payload = build_order_payload(&customer(), &items, None, raw, raw).unwrap();

        assert_eq!(payload.customer_id, "cus-1");
        assert_eq!(payload.address, "12 Nguyen Hue, District 1");
        assert_eq!(payload.promotion_code, None);
        assert_eq!(payload.discount_percent, 0);
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let items = vec![item("b1", 100_000, 2), item("b2", 50_000, 1)];
        let promo = sale10();
        let raw = compute_total(&items);
        let discounted = apply_discount(raw, Some(&promo));

        let first =
            build_order_payload(&customer(), &items, Some(&promo), raw, discounted).unwrap();
        let second =
            build_order_payload(&customer(), &items, Some(&promo), raw, discounted).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_payload_wire_shape() {
        let items = vec![item("b1", 100_000, 2)];
        let raw = compute_total(&items);
        let payload = build_order_payload(&customer(), &items, None, raw, raw).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["items"][0]["bookId"], "b1");
        assert_eq!(json["items"][0]["totalPrice"], "200000");
        assert_eq!(json["totalPrice"], "200000");
        assert!(json["promotionCode"].is_null());
    }
}
