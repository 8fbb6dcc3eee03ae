//! Customer domain types.
//!
//! These types represent validated domain objects separate from database row types.

use northwind_core::CustomerId;

/// A storefront customer.
///
/// The primary identity record. Exists before, and independently of, the
/// customer's [`AuthenticationRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Case-folded username chosen at registration.
    pub id: CustomerId,
}

/// Credentials for a [`Customer`].
///
/// Created exactly once per customer, in the same transaction as the
/// customer row.
#[derive(Clone)]
pub struct AuthenticationRecord {
    /// The customer these credentials belong to.
    pub user_id: CustomerId,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Legacy column, written as a copy of `user_id` at registration.
    ///
    /// Nothing in the authentication flow reads it; it is carried so rows
    /// round-trip unchanged.
    pub legacy_session_id: String,
}

impl std::fmt::Debug for AuthenticationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationRecord")
            .field("user_id", &self.user_id)
            .field("password_hash", &"[REDACTED]")
            .field("legacy_session_id", &self.legacy_session_id)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let record = AuthenticationRecord {
            user_id: CustomerId::parse("alice").unwrap(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            legacy_session_id: "alice".to_string(),
        };

        let debug_output = format!("{record:?}");
        assert!(debug_output.contains("alice"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }
}
