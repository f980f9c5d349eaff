//! # Cart State
//!
//! Manages the shopper's in-progress cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Commands can run concurrently on the async runtime
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Storefront Action        Command                 Cart State Change     │
//! │  ─────────────────        ───────                 ─────────────────     │
//! │                                                                         │
//! │  Click "Add to cart" ────► add_to_cart() ───────► items.push(item)     │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ──► items[i].qty = n     │
//! │                                                                         │
//! │  Tick / untick ──────────► set_item_selected() ─► items[i].selected    │
//! │                                                                         │
//! │  Click Remove ───────────► remove_from_cart() ──► items.remove(i)      │
//! │                                                                         │
//! │  Order placed ───────────► place_order() ───────► purchased removed    │
//! │                                                                         │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.         │
//! │        Never hold the lock across an `.await`.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use bookstore_core::cart::selected_items;
use bookstore_core::validation::{validate_cart_size, validate_price, validate_quantity};
use bookstore_core::{
    Book, CartTotals, CoreError, CoreResult, LineItem, Promotion, MAX_CART_ITEMS,
    MAX_ITEM_QUANTITY,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `book_id` (adding the same book increases quantity)
/// - Quantity must be > 0 (setting it to 0 removes the line)
/// - Maximum lines: 100 (configured in bookstore-core)
/// - Maximum quantity per line: 999 (configured in bookstore-core)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<LineItem>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a book to the cart or increases quantity if already present.
    ///
    /// The line is (re)selected either way. The price is frozen on first add.
    pub fn add_item(&mut self, book: &Book, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_price(book.price)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.book_id == book.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            ensure_stock(book, new_qty)?;
            item.quantity = new_qty;
            item.selected = true;
            return Ok(());
        }

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        })?;
        ensure_stock(book, quantity)?;

        self.items.push(LineItem::from_book(book, quantity));
        Ok(())
    }

    /// Updates the quantity of a line.
    ///
    /// ## Behavior
    /// - If quantity is 0: removes the line
    /// - If book not found: returns error
    pub fn update_quantity(&mut self, book_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(book_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        let item = self.find_mut(book_id)?;
        item.quantity = quantity;
        Ok(())
    }

    /// Ticks or unticks a line for checkout.
    pub fn set_selected(&mut self, book_id: &str, selected: bool) -> CoreResult<()> {
        self.find_mut(book_id)?.selected = selected;
        Ok(())
    }

    /// Ticks or unticks every line.
    pub fn set_all_selected(&mut self, selected: bool) {
        for item in &mut self.items {
            item.selected = selected;
        }
    }

    /// Removes a line by book ID.
    pub fn remove_item(&mut self, book_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.book_id != book_id);

        if self.items.len() == initial_len {
            Err(CoreError::BookNotInCart(book_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Takes ordered quantities out of the cart, returning how many lines went.
    ///
    /// Called after an order is accepted with `(book_id, quantity)` pairs
    /// from the submitted payload. Each matching line loses the ordered
    /// quantity and is removed only when nothing is left, so copies added
    /// while the order was in flight stay.
    pub fn remove_purchased<'a, I>(&mut self, ordered: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        for (book_id, quantity) in ordered {
            if let Some(item) = self.items.iter_mut().find(|i| i.book_id == book_id) {
                item.quantity -= quantity;
            }
        }

        let initial_len = self.items.len();
        self.items.retain(|i| i.quantity > 0);
        initial_len - self.items.len()
    }

    /// Replaces all lines, e.g. with the server-side cart.
    pub fn replace_items(&mut self, items: Vec<LineItem>) {
        self.items = items;
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns copies of the selected lines, in cart order.
    pub fn selected_items(&self) -> Vec<LineItem> {
        selected_items(&self.items).cloned().collect()
    }

    /// Computes totals, discounted by `promotion` when given.
    pub fn totals(&self, promotion: Option<&Promotion>) -> CartTotals {
        CartTotals::compute(&self.items, promotion)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, book_id: &str) -> CoreResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|i| i.book_id == book_id)
            .ok_or_else(|| CoreError::BookNotInCart(book_id.to_string()))
    }
}

fn ensure_stock(book: &Book, quantity: i64) -> CoreResult<()> {
    if book.can_order(quantity) {
        return Ok(());
    }
    Err(CoreError::InsufficientStock {
        title: book.title.clone(),
        available: book.stock.unwrap_or(0),
        requested: quantity,
    })
}

/// Shared cart state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>` because:
/// - `Arc`: Allows shared ownership across tasks
/// - `Mutex`: Ensures only one command modifies the cart at a time
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals(None));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&book, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}
