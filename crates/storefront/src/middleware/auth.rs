//! Access guard and authentication extractors.
//!
//! Everything here reads the [`CurrentUser`] placed in the request extensions
//! by [`load_current_user`](super::identity::load_current_user). Nothing here
//! touches the session store or the database; the check is made fresh on
//! every request.

use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use northwind_core::{CustomerId, RedirectTarget};

use crate::models::{AuthenticationRecord, CurrentUser, session_keys};

/// Path of the login page anonymous requests are sent to.
pub const LOGIN_PATH: &str = "/auth/login";

/// Error returned when authentication is required but the request is anonymous.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl AuthRejection {
    fn for_path(path: &str) -> Self {
        if path.starts_with("/api/") {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Current user of a request, anonymous if the identity loader did not run.
fn current_user(parts: &Parts) -> CurrentUser {
    parts
        .extensions
        .get::<CurrentUser>()
        .cloned()
        .unwrap_or_default()
}

/// Access guard middleware.
///
/// Wrap any protected routes with it:
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/account", get(account::index))
///     .route_layer(axum::middleware::from_fn(require_login));
/// ```
///
/// Anonymous requests are redirected to the login page (API paths get
/// `401 Unauthorized`) without the wrapped handler running. Authenticated
/// requests pass through and the handler's response is returned unchanged.
///
/// # Errors
///
/// Returns `AuthRejection` if the request is anonymous.
pub async fn require_login(request: Request, next: Next) -> Result<Response, AuthRejection> {
    let (parts, body) = request.into_parts();

    if !current_user(&parts).is_authenticated() {
        tracing::debug!(path = %parts.uri.path(), "anonymous request to protected route");
        return Err(AuthRejection::for_path(parts.uri.path()));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Extractor that requires an authenticated customer.
///
/// Rejects the same way [`require_login`] does.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(record): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", record.user_id)
/// }
/// ```
pub struct RequireUser(pub AuthenticationRecord);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts)
            .0
            .map(Self)
            .ok_or_else(|| AuthRejection::for_path(parts.uri.path()))
    }
}

/// [`CurrentUser`] is itself an extractor for handlers that serve both
/// anonymous and authenticated customers.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(current_user(parts))
    }
}

/// Record a successful login in the session.
///
/// Overwrites any previous identity. The pending destination is stored only
/// when one was given; an earlier pending destination is otherwise left alone.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user_id: &CustomerId,
    next: Option<RedirectTarget>,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::USER_ID, user_id).await?;
    if let Some(target) = next {
        session.insert(session_keys::NEXT, target).await?;
    }
    Ok(())
}

/// Take the pending post-login destination out of the session.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn take_pending_redirect(
    session: &Session,
) -> Result<Option<RedirectTarget>, tower_sessions::session::Error> {
    session.remove::<RedirectTarget>(session_keys::NEXT).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::header::LOCATION, middleware, routing::get};
    use tower::ServiceExt;

    async fn protected_handler() -> &'static str {
        "Protected"
    }

    fn guarded() -> Router {
        Router::new()
            .route("/protected", get(protected_handler))
            .route("/api/protected", get(protected_handler))
            .route_layer(middleware::from_fn(require_login))
    }

    fn record(id: &str) -> AuthenticationRecord {
        AuthenticationRecord {
            user_id: CustomerId::parse(id).unwrap(),
            password_hash: String::new(),
            legacy_session_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_anonymous_request_redirects_to_login() {
        let mut request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(CurrentUser::anonymous());

        let response = guarded().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_missing_context_counts_as_anonymous() {
        let request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();

        let response = guarded().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_anonymous_api_request_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/protected")
            .body(Body::empty())
            .unwrap();

        let response = guarded().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authenticated_request_passes_through() {
        let mut request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(CurrentUser(Some(record("alice"))));

        let response = guarded().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Protected");
    }

    #[tokio::test]
    async fn test_require_user_extractor() {
        async fn whoami(RequireUser(record): RequireUser) -> String {
            record.user_id.to_string()
        }

        let app = Router::new().route("/whoami", get(whoami));

        let anonymous = Request::builder().uri("/whoami").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(anonymous).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let mut signed_in = Request::builder().uri("/whoami").body(Body::empty()).unwrap();
        signed_in
            .extensions_mut()
            .insert(CurrentUser(Some(record("bob"))));
        let response = app.oneshot(signed_in).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"bob");
    }
}
