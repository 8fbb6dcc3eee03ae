//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (credential store)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! GET  /auth/logout            - Logout action
//!
//! # Requires auth
//! GET  /account                - Account overview
//! GET  /cart/assign-user       - Post-login hand-off to the cart subsystem
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod health;
pub mod home;


use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware::{RequestId, load_current_user, request_id_middleware, require_login};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Create the routes that require a logged-in customer.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(account::index))
        .route("/cart/assign-user", get(cart::assign_user))
        .route_layer(from_fn(require_login))
}

/// Create all session-aware routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/auth", auth_routes())
        .merge(protected_routes())
}

/// Assemble the full application.
///
/// Health checks sit outside the session and identity layers so probes
/// neither create sessions nor hit the credential store for identity.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let session_aware = routes()
        .layer(from_fn_with_state(state.clone(), load_current_user))
        .layer(session_layer);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(session_aware)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %RequestId::of(request.extensions()),
            )
        }))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
