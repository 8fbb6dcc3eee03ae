//! Authentication error types.
//!
//! The `Display` text of every user-facing variant is the exact message shown
//! on the login or registration form.

use thiserror::Error;

use northwind_core::CustomerId;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration submitted without a username.
    #[error("User ID is required.")]
    MissingUserId,

    /// Username contains a character the store cannot hold.
    #[error("User ID cannot contain NUL characters.")]
    InvalidUserId,

    /// Registration submitted without a password.
    #[error("Password is required.")]
    MissingPassword,

    /// A customer with this id already exists.
    #[error("Customer already exists—try logging in!")]
    CustomerExists,

    /// Lost a race with a concurrent registration of the same id.
    #[error("User {0} is already registered.")]
    AlreadyRegistered(CustomerId),

    /// No authentication record for this id.
    #[error("Incorrect user id.")]
    UnknownUserId,

    /// Authentication record found, password did not verify.
    #[error("Incorrect password.")]
    IncorrectPassword,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether this error is the customer's to fix, shown on the form.
    ///
    /// Everything else is a server fault and surfaces as a 500.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Repository(_) | Self::PasswordHash)
    }
}
