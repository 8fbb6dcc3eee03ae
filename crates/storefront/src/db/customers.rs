//! `PostgreSQL` credential store.
//!
//! All queries bind their parameters; customer ids are never interpolated
//! into SQL text.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use northwind_core::CustomerId;

use super::{CredentialStore, RepositoryError, conflict_on_unique};
use crate::models::{AuthenticationRecord, Customer};

/// Credential store backed by the `northwind` schema.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a new store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id
            FROM northwind.customer
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Customer {
                id: r.try_get("id")?,
            })),
            None => Ok(None),
        }
    }

    async fn find_authentication(
        &self,
        id: &CustomerId,
    ) -> Result<Option<AuthenticationRecord>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT user_id, password, session_id
            FROM northwind.authentication
            WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let password_hash: String = r.try_get("password")?;
        if password_hash.is_empty() {
            return Err(RepositoryError::DataCorruption(format!(
                "empty password hash for customer {id}"
            )));
        }

        Ok(Some(AuthenticationRecord {
            user_id: r.try_get("user_id")?,
            password_hash,
            legacy_session_id: r.try_get("session_id")?,
        }))
    }

    async fn create_customer_with_password(
        &self,
        id: &CustomerId,
        password_hash: &str,
    ) -> Result<AuthenticationRecord, RepositoryError> {
        // Dropping the transaction on an early return rolls it back
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO northwind.customer (id)
            VALUES ($1)
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "customer"))?;

        sqlx::query(
            r"
            INSERT INTO northwind.authentication (user_id, password, session_id)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(id)
        .bind(password_hash)
        .bind(id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "authentication record"))?;

        tx.commit().await?;

        Ok(AuthenticationRecord {
            user_id: id.clone(),
            password_hash: password_hash.to_owned(),
            legacy_session_id: id.as_str().to_owned(),
        })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
