//! Identity loader.
//!
//! Runs before every handler. Resolves the session's `user_id` into a
//! [`CurrentUser`] and stores it in the request extensions, where the access
//! guard and the [`CurrentUser`] extractor read it.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use northwind_core::CustomerId;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Middleware that binds the request to the session's customer, if any.
///
/// A session whose `user_id` no longer resolves to an authentication record
/// leaves the request anonymous. The stale value stays in the session; it is
/// only replaced by the next login or removed by logout.
///
/// # Errors
///
/// Returns `AppError` if the session or the credential store cannot be read.
pub async fn load_current_user(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id: Option<CustomerId> = session.get(session_keys::USER_ID).await?;

    let current_user = match user_id {
        None => CurrentUser::anonymous(),
        Some(id) => match state.store().find_authentication(&id).await? {
            Some(record) => CurrentUser(Some(record)),
            None => {
                tracing::warn!(user_id = %id, "session refers to unknown customer; treating as anonymous");
                CurrentUser::anonymous()
            }
        },
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
