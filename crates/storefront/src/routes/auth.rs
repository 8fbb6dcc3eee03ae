//! Authentication route handlers.
//!
//! Handles registration, login and logout against the local credential store.
//! Customer mistakes re-render the submitted form with the error message
//! (HTTP 200); only server faults become an [`AppError`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use northwind_core::RedirectTarget;

use crate::error::{AppError, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::middleware::{LOGIN_PATH, set_current_user};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Where a successful login lands: the cart subsystem's hand-off route.
pub const ASSIGN_USER_PATH: &str = "/cart/assign-user";

// =============================================================================
// Form Types
// =============================================================================

/// Login and registration form data.
///
/// Absent fields deserialize as empty, so a missing username or password is
/// reported through the normal validation messages.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters carrying a post-login destination into the form.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub next: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub next: Option<String>,
}

/// Login URL to send a freshly registered customer to.
///
/// Only an allow-listed destination is forwarded.
fn login_location(next: Option<RedirectTarget>) -> String {
    match next {
        Some(target) => format!("{LOGIN_PATH}?next={}", target.path()),
        None => LOGIN_PATH.to_owned(),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<NextQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: None,
        next: query.next,
    }
}

/// Handle registration form submission.
///
/// Creates the customer and its authentication record, then sends the
/// customer to the login page. Registration does not log the customer in.
///
/// # Errors
///
/// Returns `AppError` if the credential store fails.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.store());

    match auth.register(&form.user_id, &form.password).await {
        Ok(record) => {
            tracing::info!(user_id = %record.user_id, "customer registered");
            add_breadcrumb("auth", "customer registered");

            let next = RedirectTarget::from_param(form.next.as_deref());
            Ok(Redirect::to(&login_location(next)).into_response())
        }
        Err(err) if err.is_user_error() => {
            tracing::warn!(error = %err, "registration rejected");
            Ok(RegisterTemplate {
                error: Some(err.to_string()),
                next: form.next,
            }
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<NextQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: None,
        next: query.next,
    }
}

/// Handle login form submission.
///
/// On success stores the customer id (and an allow-listed `next`) in the
/// session and hands off to the cart subsystem.
///
/// # Errors
///
/// Returns `AppError` if the credential store or the session store fails.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.store());

    match auth.login(&form.user_id, &form.password).await {
        Ok(record) => {
            let next = RedirectTarget::from_param(form.next.as_deref());

            if let Err(e) = set_current_user(&session, &record.user_id, next).await {
                tracing::error!("Failed to set session: {}", e);
                return Err(e.into());
            }

            set_sentry_user(&record.user_id);
            tracing::info!(user_id = %record.user_id, "customer logged in");

            Ok(Redirect::to(ASSIGN_USER_PATH).into_response())
        }
        Err(err) if err.is_user_error() => {
            tracing::warn!(error = %err, "login rejected");
            Ok(LoginTemplate {
                error: Some(err.to_string()),
                next: form.next,
            }
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the entire session, whether or not anyone was logged in.
///
/// # Errors
///
/// Returns `AppError` if the session store cannot delete the session.
pub async fn logout(session: Session) -> Result<Response, AppError> {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
        return Err(e.into());
    }

    clear_sentry_user();

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_location_forwards_only_allow_listed_next() {
        assert_eq!(login_location(None), "/auth/login");
        assert_eq!(
            login_location(Some(RedirectTarget::CheckoutShipping)),
            "/auth/login?next=/checkout/shipping/"
        );
    }
}
