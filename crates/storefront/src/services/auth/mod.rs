//! Authentication service.
//!
//! Provides password registration and login against a [`CredentialStore`].

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use northwind_core::{CustomerId, CustomerIdError};

use crate::db::{CredentialStore, RepositoryError};
use crate::models::AuthenticationRecord;

/// Authentication service.
///
/// Handles customer registration and password login. Holds no state of its
/// own; every call is a fresh check against the store.
pub struct AuthService<'a> {
    store: &'a dyn CredentialStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn CredentialStore) -> Self {
        Self { store }
    }

    /// Register a new customer with a username and password.
    ///
    /// The username is case-folded. Checks run in order: username present,
    /// password present, customer not already registered.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingUserId` if the username is empty.
    /// Returns `AuthError::InvalidUserId` if the username contains a NUL character.
    /// Returns `AuthError::MissingPassword` if the password is empty.
    /// Returns `AuthError::CustomerExists` if the customer is already registered.
    /// Returns `AuthError::AlreadyRegistered` if a concurrent registration won the insert.
    pub async fn register(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<AuthenticationRecord, AuthError> {
        let id = CustomerId::parse(user_id).map_err(|e| match e {
            CustomerIdError::Empty => AuthError::MissingUserId,
            CustomerIdError::ContainsNul => AuthError::InvalidUserId,
        })?;

        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        if self.store.find_customer(&id).await?.is_some() {
            return Err(AuthError::CustomerExists);
        }

        let password_hash = hash_password(password)?;

        match self
            .store
            .create_customer_with_password(&id, &password_hash)
            .await
        {
            Ok(record) => Ok(record),
            Err(RepositoryError::Conflict(_)) => Err(AuthError::AlreadyRegistered(id)),
            Err(other) => Err(AuthError::Repository(other)),
        }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownUserId` if no authentication record matches.
    /// Returns `AuthError::IncorrectPassword` if the password does not verify.
    pub async fn login(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<AuthenticationRecord, AuthError> {
        let Ok(id) = CustomerId::parse(user_id) else {
            return Err(AuthError::UnknownUserId);
        };

        let record = self
            .store
            .find_authentication(&id)
            .await?
            .ok_or(AuthError::UnknownUserId)?;

        verify_password(password, &record.password_hash)?;

        Ok(record)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| {
        AuthError::Repository(RepositoryError::DataCorruption(format!(
            "unparseable password hash: {e}"
        )))
    })?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::IncorrectPassword)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryCredentialStore;
    use crate::db::testing::RacingStore;

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("secret"));
        assert!(verify_password("secret", &first).is_ok());
        assert!(matches!(
            verify_password("Secret", &first),
            Err(AuthError::IncorrectPassword)
        ));
    }

    #[test]
    fn test_unparseable_hash_is_server_fault() {
        let err = verify_password("secret", "not-a-phc-string").unwrap_err();
        assert!(!err.is_user_error());
    }

    #[tokio::test]
    async fn test_register_requires_user_id() {
        let store = MemoryCredentialStore::new();
        let auth = AuthService::new(&store);

        for password in ["", "test"] {
            let err = auth.register("", password).await.unwrap_err();
            assert!(matches!(err, AuthError::MissingUserId));
        }
        assert_eq!(store.customer_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_nul_in_user_id() {
        let store = MemoryCredentialStore::new();
        let auth = AuthService::new(&store);

        let err = auth.register("a\0b", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidUserId));
        assert!(err.is_user_error());
        assert_eq!(store.customer_count().await, 0);

        assert!(matches!(
            auth.login("a\0b", "pw").await.unwrap_err(),
            AuthError::UnknownUserId
        ));
    }

    #[tokio::test]
    async fn test_register_race_loser_is_already_registered() {
        let store = RacingStore::default();
        let auth = AuthService::new(&store);

        let err = auth.register("Alice", "secret").await.unwrap_err();
        assert!(matches!(&err, AuthError::AlreadyRegistered(id) if id.as_str() == "alice"));
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "User alice is already registered.");
        assert_eq!(store.inner.customer_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_requires_password() {
        let store = MemoryCredentialStore::new();
        let auth = AuthService::new(&store);

        let err = auth.register("test", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingPassword));
        assert_eq!(store.customer_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_folds_case_and_rejects_duplicates() {
        let store = MemoryCredentialStore::new();
        let auth = AuthService::new(&store);

        let record = auth.register("Alice", "secret").await.unwrap();
        assert_eq!(record.user_id.as_str(), "alice");
        assert_eq!(record.legacy_session_id, "alice");

        let err = auth.register("ALICE", "other").await.unwrap_err();
        assert!(matches!(err, AuthError::CustomerExists));
    }

    #[tokio::test]
    async fn test_login() {
        let store = MemoryCredentialStore::new();
        let auth = AuthService::new(&store);
        auth.register("alice", "secret").await.unwrap();

        assert!(matches!(
            auth.login("invalid", "secret").await.unwrap_err(),
            AuthError::UnknownUserId
        ));
        assert!(matches!(
            auth.login("", "secret").await.unwrap_err(),
            AuthError::UnknownUserId
        ));
        assert!(matches!(
            auth.login("alice", "wrong").await.unwrap_err(),
            AuthError::IncorrectPassword
        ));

        let record = auth.login("AlIcE", "secret").await.unwrap();
        assert_eq!(record.user_id.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_unusual_credentials_round_trip() {
        let store = MemoryCredentialStore::new();
        let auth = AuthService::new(&store);

        for raw in [
            "test_!@#$%^*&()`'",
            "éñçøßΩ中あ😊€",
            "'; DROP TABLE customer; --",
        ] {
            auth.register(raw, raw).await.unwrap();
            let record = auth.login(raw, raw).await.unwrap();
            assert_eq!(record.user_id.as_str(), raw.to_lowercase());
        }
    }
}
