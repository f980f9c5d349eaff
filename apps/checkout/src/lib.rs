//! # Bookstore Checkout
//!
//! Checkout layer of the bookstore storefront. Holds the cart and promotion
//! state, talks to the bookstore API through [`gateway::BookstoreApi`], and
//! leaves every business rule to `bookstore-core`.
//!
//! ## Module Organization
//! ```text
//! bookstore_checkout/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── promotions.rs ◄─ Fetched promotions + entered code
//! │   ├── session.rs  ◄─── Explicit shopper session
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── checkout.rs ◄─── Promotion, quote and order commands
//! ├── gateway.rs      ◄─── BookstoreApi trait
//! ├── ingest.rs       ◄─── Wire records → domain types
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Wiring
//! ```rust,ignore
//! bookstore_checkout::init_tracing();
//!
//! let config = ConfigState::load()?;
//! let cart = CartState::new();
//! let promotions = PromotionState::new();
//! let session = Session::new(customer_id, token);
//!
//! load_promotions(&api, &session, &promotions, Utc::now()).await?;
//! let quote = apply_promotion_code(&cart, &promotions, "SALE10", &Local::now())?;
//! println!("{}", config.format_money(quote.totals.discounted_total));
//! ```

pub mod commands;
pub mod error;
pub mod gateway;
pub mod ingest;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,bookstore=debug";

/// Installs the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bookstore_checkout=trace` - Trace this crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
    }
}
