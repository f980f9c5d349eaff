//! # State Module
//!
//! Checkout state, one type per concern.
//!
//! Each command takes only the state it needs, so a cart command never
//! waits on a promotion reload and tests build just the pieces they touch.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌────────────────┐ ┌─────────────┐ ┌──────────────┐  │
//! │  │  CartState   │ │ PromotionState │ │   Session   │ │ ConfigState  │  │
//! │  │              │ │                │ │             │ │              │  │
//! │  │  Arc<Mutex<  │ │  RwLock<       │ │ customer_id │ │ currency     │  │
//! │  │    Cart      │ │   promotions,  │ │ token       │ │ api url      │  │
//! │  │  >>          │ │   code>        │ │             │ │              │  │
//! │  └──────────────┘ └────────────────┘ └─────────────┘ └──────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • PromotionState: RwLock, many readers, reload writes                 │
//! │  • Session, ConfigState: Read-only after creation                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod promotions;
mod session;

pub use cart::{Cart, CartState};
pub use config::{ConfigError, ConfigState, SymbolPosition, CONFIG_PATH_VAR};
pub use promotions::PromotionState;
pub use session::Session;
