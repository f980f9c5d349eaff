use std::fmt;
use std::sync::{Mutex, PoisonError};

use bookstore_core::OrderPayload;

use crate::gateway::{BookstoreApi, GatewayError, OrderReceipt};
use crate::ingest::{CartItemRecord, PromotionRecord};
use crate::state::Session;

type SubmitHook = Box<dyn Fn() + Send + Sync>;

/// In-memory bookstore API that records submitted orders.
#[derive(Default)]
pub(crate) struct FakeApi {
    promotions: Vec<PromotionRecord>,
    cart: Vec<CartItemRecord>,
    unreachable: bool,
    on_submit: Option<SubmitHook>,
    submitted: Mutex<Vec<OrderPayload>>,
}

impl fmt::Debug for FakeApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeApi")
            .field("promotions", &self.promotions.len())
            .field("cart", &self.cart.len())
            .field("unreachable", &self.unreachable)
            .field("submitted", &self.submitted().len())
            .finish_non_exhaustive()
    }
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn session() -> Session {
        Session::new("cus-1", "token-1")
    }

    pub(crate) fn with_promotions(mut self, promotions: Vec<PromotionRecord>) -> Self {
        self.promotions = promotions;
        self
    }

    pub(crate) fn with_cart(mut self, cart: Vec<CartItemRecord>) -> Self {
        self.cart = cart;
        self
    }

    /// Every call fails with a transport error.
    pub(crate) fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Runs `hook` while an order is being submitted, before the receipt.
    pub(crate) fn on_submit(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_submit = Some(Box::new(hook));
        self
    }

    pub(crate) fn submitted(&self) -> Vec<OrderPayload> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check(&self, session: &Session) -> Result<(), GatewayError> {
        if self.unreachable {
            return Err(GatewayError::Transport("connection refused".to_string()));
        }
        if !session.is_authenticated() {
            return Err(GatewayError::Unauthorized);
        }
        Ok(())
    }
}

impl BookstoreApi for FakeApi {
    async fn fetch_promotions(
        &self,
        session: &Session,
    ) -> Result<Vec<PromotionRecord>, GatewayError> {
        self.check(session)?;
        Ok(self.promotions.clone())
    }

    async fn fetch_cart(&self, session: &Session) -> Result<Vec<CartItemRecord>, GatewayError> {
        self.check(session)?;
        Ok(self.cart.clone())
    }

    async fn submit_order(
        &self,
        session: &Session,
        payload: &OrderPayload,
    ) -> Result<OrderReceipt, GatewayError> {
        self.check(session)?;
        if let Some(hook) = &self.on_submit {
            hook();
        }
        let mut submitted = self.submitted.lock().unwrap_or_else(PoisonError::into_inner);
        submitted.push(payload.clone());
        Ok(OrderReceipt {
            order_id: format!("ORD-{}", submitted.len()),
        })
    }
}
