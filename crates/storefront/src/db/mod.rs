//! Credential store for storefront `PostgreSQL`.
//!
//! # Database: `northwind`
//!
//! ## Tables
//!
//! - `northwind.customer` - Customer identity, keyed by case-folded username
//! - `northwind.authentication` - Password hash per customer (plus the legacy `session_id` column)
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p northwind-cli -- migrate
//! ```

pub mod customers;
pub mod memory;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use northwind_core::CustomerId;

use crate::models::{AuthenticationRecord, Customer};

pub use customers::PgCredentialStore;
pub use memory::MemoryCredentialStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate customer id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage for customers and their authentication records.
///
/// Implementations must keep customer ids unique and must create a customer
/// and its authentication record atomically: either both rows exist
/// afterwards or neither does.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Get a customer by id.
    async fn find_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Get the authentication record for a customer id.
    async fn find_authentication(
        &self,
        id: &CustomerId,
    ) -> Result<Option<AuthenticationRecord>, RepositoryError>;

    /// Create a customer and its authentication record in one transaction.
    ///
    /// The legacy session id column is written as a copy of the customer id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if either row already exists.
    async fn create_customer_with_password(
        &self,
        id: &CustomerId,
        password_hash: &str,
    ) -> Result<AuthenticationRecord, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-violation into `RepositoryError::Conflict`.
fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
