//! # Session
//!
//! Who is checking out, and the token to prove it.
//!
//! The session is handed to every [`BookstoreApi`](crate::gateway::BookstoreApi)
//! call explicitly. Nothing in this crate reads a token from ambient storage.
//! Token issuance and refresh belong to the auth service; this type only
//! carries the result.

use std::fmt;

/// An authenticated shopper.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    customer_id: String,
    access_token: String,
}

impl Session {
    pub fn new(customer_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Session {
            customer_id: customer_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Checks that both identity and token are present.
    pub fn is_authenticated(&self) -> bool {
        !self.customer_id.trim().is_empty() && !self.access_token.trim().is_empty()
    }
}

/// Keeps the token out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("customer_id", &self.customer_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
