//! Cart hand-off route.
//!
//! The cart subsystem owns what happens to a customer's cart after login.
//! This module provides only the guarded entry point the login handler
//! redirects to, and forwards the customer to the pending destination.

use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::take_pending_redirect;

/// Continue after login.
///
/// Consumes the pending `next` destination stored at login, if any, and
/// redirects there; otherwise redirects home.
///
/// # Errors
///
/// Returns `AppError` if the session store fails.
pub async fn assign_user(session: Session) -> Result<Response, AppError> {
    let destination = take_pending_redirect(&session)
        .await?
        .map_or("/", |target| target.path());

    Ok(Redirect::to(destination).into_response())
}
