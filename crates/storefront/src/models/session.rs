//! Session-related types.
//!
//! Types stored in the session, and the per-request identity derived from it.

use northwind_core::CustomerId;

use super::AuthenticationRecord;

/// Request-scoped user context.
///
/// Recomputed on every request by the identity loader middleware and placed
/// in the request extensions; never persisted. `None` means the request is
/// anonymous, either because the session carries no identity or because the
/// identity no longer resolves to a record.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<AuthenticationRecord>);

impl CurrentUser {
    /// An anonymous request.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// Whether an authenticated customer is bound to this request.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    /// The bound customer's id, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&CustomerId> {
        self.0.as_ref().map(|record| &record.user_id)
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the logged-in customer's id (`CustomerId`).
    pub const USER_ID: &str = "user_id";

    /// Key for the pending post-login destination (`RedirectTarget`).
    pub const NEXT: &str = "next";
}
