//! # Checkout Commands
//!
//! Everything the storefront calls into.
//!
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Cart manipulation
//! └── checkout.rs  ◄─── Promotions, quote, order placement
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Storefront                                                             │
//! │  ──────────                                                             │
//! │  const quote = await checkout.applyPromotionCode('SALE10');             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust                                                                   │
//! │  ────                                                                   │
//! │  fn apply_promotion_code(                                               │
//! │      cart: &CartState,            ◄── only the state it needs           │
//! │      promotions: &PromotionState,                                       │
//! │      code: &str,                                                        │
//! │      now: DateTime<Tz>,           ◄── clock passed in, never read       │
//! │  ) -> Result<CheckoutQuote, ApiError>                                   │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Storefront receives: CheckoutQuote                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that talk to the bookstore API take a [`BookstoreApi`] and the
//! shopper's [`Session`]. No lock is held across an `.await`.
//!
//! [`BookstoreApi`]: crate::gateway::BookstoreApi
//! [`Session`]: crate::state::Session

pub mod cart;
pub mod checkout;
