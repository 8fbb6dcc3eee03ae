//! Credential stores with scripted behaviour for tests.

use async_trait::async_trait;

use northwind_core::CustomerId;

use super::{CredentialStore, MemoryCredentialStore, RepositoryError};
use crate::models::{AuthenticationRecord, Customer};

/// A store where another registration always wins the insert.
///
/// `find_customer` reports no customer, so the existence pre-check passes,
/// then `create_customer_with_password` fails with a uniqueness conflict and
/// writes nothing. Reads of authentication records go to `inner`.
#[derive(Clone, Default)]
pub struct RacingStore {
    pub inner: MemoryCredentialStore,
}

#[async_trait]
impl CredentialStore for RacingStore {
    async fn find_customer(&self, _id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(None)
    }

    async fn find_authentication(
        &self,
        id: &CustomerId,
    ) -> Result<Option<AuthenticationRecord>, RepositoryError> {
        self.inner.find_authentication(id).await
    }

    async fn create_customer_with_password(
        &self,
        _id: &CustomerId,
        _password_hash: &str,
    ) -> Result<AuthenticationRecord, RepositoryError> {
        Err(RepositoryError::Conflict("customer already exists".to_owned()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.inner.ping().await
    }
}
