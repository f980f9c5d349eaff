//! # Cart Commands
//!
//! Cart manipulation for the storefront cart screen.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                 │              │
//! │       │           add_to_cart                      place_order         │
//! │   load_cart       update_cart_item                 (checkout.rs)       │
//! │                   set_item_selected                      │              │
//! │                   remove_from_cart                       ▼              │
//! │                        │                    purchased lines removed     │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals returned here never include a promotion. The discounted figure
//! comes from `quote` and `apply_promotion_code` in the checkout commands.

use bookstore_core::{Book, CartTotals, LineItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::gateway::BookstoreApi;
use crate::ingest::ingest_cart;
use crate::state::{Cart, CartState, Session};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items.clone(),
            totals: cart.totals(None),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a book to the cart.
///
/// ## Behavior
/// - Book already in cart: quantity increases and the line is selected again
/// - Book not in cart: added as a new selected line
/// - Price is frozen at the time of the first add
///
/// ## Arguments
/// * `book` - Catalog entry the shopper clicked
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    cart: &CartState,
    book: &Book,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(book_id = %book.id, quantity = %quantity, "add_to_cart command");

    cart.with_cart_mut(|c| {
        c.add_item(book, quantity)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Updates the quantity of a line. Quantity 0 removes it.
pub fn update_cart_item(
    cart: &CartState,
    book_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(book_id = %book_id, quantity = %quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        c.update_quantity(book_id, quantity)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Ticks or unticks one line for checkout.
pub fn set_item_selected(
    cart: &CartState,
    book_id: &str,
    selected: bool,
) -> Result<CartResponse, ApiError> {
    debug!(book_id = %book_id, selected, "set_item_selected command");

    cart.with_cart_mut(|c| {
        c.set_selected(book_id, selected)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Ticks or unticks every line ("select all").
pub fn set_all_selected(cart: &CartState, selected: bool) -> CartResponse {
    debug!(selected, "set_all_selected command");

    cart.with_cart_mut(|c| {
        c.set_all_selected(selected);
        CartResponse::from(&*c)
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, book_id: &str) -> Result<CartResponse, ApiError> {
    debug!(book_id = %book_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(book_id)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// Replaces the local cart with the shopper's server-side cart.
///
/// Lines the API sends without a book or with a bad quantity are dropped.
pub async fn load_cart<A: BookstoreApi>(
    api: &A,
    session: &Session,
    cart: &CartState,
) -> Result<CartResponse, ApiError> {
    debug!(customer_id = %session.customer_id(), "load_cart command");

    let records = api.fetch_cart(session).await?;
    let items = ingest_cart(records);
    info!(lines = items.len(), "Server cart loaded");

    Ok(cart.with_cart_mut(|c| {
        c.replace_items(items);
        CartResponse::from(&*c)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::ingest::CartItemRecord;
    use crate::test_support::FakeApi;
    use bookstore_core::Money;

    fn book(id: &str, price: i64) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {}", id),
            price: Money::from_major(price),
            stock: Some(10),
        }
    }

    #[test]
    fn test_add_and_update() {
        let cart = CartState::new();

        let resp = add_to_cart(&cart, &book("b1", 100_000), Some(2)).unwrap();
        assert_eq!(resp.totals.raw_total, Money::from_major(200_000));

        let resp = add_to_cart(&cart, &book("b2", 50_000), None).unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.totals.raw_total, Money::from_major(250_000));

        let resp = update_cart_item(&cart, "b1", 0).unwrap();
        assert_eq!(resp.items.len(), 1);
        assert_eq!(get_cart(&cart), resp);
    }

    #[test]
    fn test_selection_drives_totals() {
        let cart = CartState::new();
        add_to_cart(&cart, &book("b1", 100_000), Some(2)).unwrap();
        add_to_cart(&cart, &book("b2", 50_000), Some(1)).unwrap();

        let resp = set_item_selected(&cart, "b2", false).unwrap();
        assert_eq!(resp.totals.raw_total, Money::from_major(200_000));

        let resp = set_all_selected(&cart, false);
        assert!(resp.totals.raw_total.is_zero());
        assert_eq!(resp.items.len(), 2);
    }

    #[test]
    fn test_cart_errors_map_to_api_codes() {
        let cart = CartState::new();

        let err = remove_from_cart(&cart, "missing").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&cart, &book("b1", 10), Some(11)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        let err = add_to_cart(&cart, &book("b1", 10), Some(-1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_clear_cart() {
        let cart = CartState::new();
        add_to_cart(&cart, &book("b1", 10), None).unwrap();
        assert!(clear_cart(&cart).items.is_empty());
    }

    #[tokio::test]
    async fn test_load_cart_replaces_and_filters() {
        let cart = CartState::new();
        add_to_cart(&cart, &book("local", 10), None).unwrap();

        let api = FakeApi::new().with_cart(vec![
            CartItemRecord {
                book_id: Some("b1".to_string()),
                title: "Dune".to_string(),
                price: Money::from_major(100_000),
                quantity: 2,
                selected: true,
            },
            CartItemRecord {
                book_id: None,
                title: "Gone".to_string(),
                price: Money::from_major(10),
                quantity: 1,
                selected: true,
            },
        ]);

        let resp = load_cart(&api, &FakeApi::session(), &cart).await.unwrap();
        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.items[0].book_id, "b1");
        assert_eq!(resp.totals.raw_total, Money::from_major(200_000));
    }

    #[tokio::test]
    async fn test_load_cart_failure_keeps_local_cart() {
        let cart = CartState::new();
        add_to_cart(&cart, &book("local", 10), None).unwrap();

        let api = FakeApi::new().unreachable();
        let err = load_cart(&api, &FakeApi::session(), &cart).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::GatewayError);
        assert_eq!(get_cart(&cart).items.len(), 1);
    }
}
