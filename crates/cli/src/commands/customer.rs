//! Customer management commands.
//!
//! Goes through the same registration path as the storefront's register
//! form, so ids are case-folded and passwords hashed identically.

use northwind_storefront::db::PgCredentialStore;
use northwind_storefront::services::auth::AuthService;

use super::{CommandError, connect};

/// Create a customer with a password.
///
/// # Errors
///
/// Returns `CommandError::Customer` if the input is rejected (empty fields,
/// existing customer), or a database error.
pub async fn create(user_id: &str, password: &str) -> Result<(), CommandError> {
    let store = PgCredentialStore::new(connect().await?);
    let auth = AuthService::new(&store);

    let record = auth
        .register(user_id, password)
        .await
        .map_err(|e| CommandError::Customer(e.to_string()))?;

    tracing::info!(user_id = %record.user_id, "Customer created");
    Ok(())
}
