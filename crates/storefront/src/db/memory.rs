//! In-process credential store.
//!
//! Same contract as [`PgCredentialStore`](super::PgCredentialStore) without a
//! database: unique customer ids, and the customer and authentication rows are
//! written under a single lock so they appear together or not at all. Used by
//! tests and for running the storefront locally without `PostgreSQL`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use northwind_core::CustomerId;

use super::{CredentialStore, RepositoryError};
use crate::models::{AuthenticationRecord, Customer};

#[derive(Default)]
struct Tables {
    customers: HashSet<CustomerId>,
    authentication: HashMap<CustomerId, AuthenticationRecord>,
}

/// Credential store held in memory. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a customer and its authentication record.
    ///
    /// The storefront itself never deletes customers; this simulates an
    /// account removed out-of-band. Returns `true` if the customer existed.
    pub async fn remove_customer(&self, id: &CustomerId) -> bool {
        let mut tables = self.tables.write().await;
        tables.authentication.remove(id);
        tables.customers.remove(id)
    }

    /// Number of customers stored.
    pub async fn customer_count(&self) -> usize {
        self.tables.read().await.customers.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .get(id)
            .map(|id| Customer { id: id.clone() }))
    }

    async fn find_authentication(
        &self,
        id: &CustomerId,
    ) -> Result<Option<AuthenticationRecord>, RepositoryError> {
        Ok(self.tables.read().await.authentication.get(id).cloned())
    }

    async fn create_customer_with_password(
        &self,
        id: &CustomerId,
        password_hash: &str,
    ) -> Result<AuthenticationRecord, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.customers.contains(id) {
            return Err(RepositoryError::Conflict("customer already exists".to_owned()));
        }
        if tables.authentication.contains_key(id) {
            return Err(RepositoryError::Conflict(
                "authentication record already exists".to_owned(),
            ));
        }

        let record = AuthenticationRecord {
            user_id: id.clone(),
            password_hash: password_hash.to_owned(),
            legacy_session_id: id.as_str().to_owned(),
        };

        tables.customers.insert(id.clone());
        tables.authentication.insert(id.clone(), record.clone());

        Ok(record)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> CustomerId {
        CustomerId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_writes_both_rows() {
        let store = MemoryCredentialStore::new();
        let record = store
            .create_customer_with_password(&id("alice"), "hash")
            .await
            .unwrap();

        assert_eq!(record.legacy_session_id, "alice");
        assert!(store.find_customer(&id("alice")).await.unwrap().is_some());
        let found = store.find_authentication(&id("alice")).await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_is_conflict_and_leaves_original() {
        let store = MemoryCredentialStore::new();
        store
            .create_customer_with_password(&id("alice"), "first")
            .await
            .unwrap();

        let err = store
            .create_customer_with_password(&id("ALICE"), "second")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let found = store.find_authentication(&id("alice")).await.unwrap().unwrap();
        assert_eq!(found.password_hash, "first");
        assert_eq!(store.customer_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_registrations_create_one_customer() {
        let store = MemoryCredentialStore::new();
        let mut handles = Vec::new();
        for n in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_customer_with_password(&id("racer"), &format!("hash-{n}"))
                    .await
                    .is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.customer_count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_customer() {
        let store = MemoryCredentialStore::new();
        store
            .create_customer_with_password(&id("bob"), "hash")
            .await
            .unwrap();

        assert!(store.remove_customer(&id("bob")).await);
        assert!(store.find_authentication(&id("bob")).await.unwrap().is_none());
        assert!(!store.remove_customer(&id("bob")).await);
    }
}
