//! # Promotion State
//!
//! Holds the promotions fetched from the bookstore API and the code the
//! shopper has entered, if any.
//!
//! Only the code is remembered, never the matched `Promotion`: the code is
//! redeemed again against the current list every time totals are shown or
//! an order is placed, so a promotion that lapses mid-checkout stops
//! applying.

use std::sync::{PoisonError, RwLock};

use bookstore_core::Promotion;
use chrono::{DateTime, Utc};

#[derive(Debug, Default)]
struct Inner {
    promotions: Vec<Promotion>,
    applied_code: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
}

/// Shared promotion state. Reads far outnumber the occasional reload.
#[derive(Debug, Default)]
pub struct PromotionState {
    inner: RwLock<Inner>,
}

impl PromotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the fetched promotion list.
    pub fn replace(&self, promotions: Vec<Promotion>, loaded_at: DateTime<Utc>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.promotions = promotions;
        inner.loaded_at = Some(loaded_at);
    }

    /// Runs `f` over the current list and the entered code.
    pub fn with_promotions<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Promotion], Option<&str>) -> R,
    {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&inner.promotions, inner.applied_code.as_deref())
    }

    pub fn applied_code(&self) -> Option<String> {
        self.with_promotions(|_, code| code.map(str::to_string))
    }

    pub fn set_applied_code(&self, code: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.applied_code = Some(code.into());
    }

    /// Forgets the entered code. Returns the code that was set.
    pub fn clear_applied_code(&self) -> Option<String> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.applied_code.take()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .loaded_at
    }

    pub fn len(&self) -> usize {
        self.with_promotions(|promotions, _| promotions.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
