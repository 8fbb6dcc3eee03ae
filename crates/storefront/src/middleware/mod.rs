//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Request ID (accept or mint `x-request-id`)
//! 3. `TraceLayer` (request span, tagged with the request ID)
//! 4. Session layer (tower-sessions)
//! 5. Identity loader (session `user_id` → [`CurrentUser`](crate::models::CurrentUser))
//! 6. Access guard (protected routes only, via `route_layer`)

pub mod auth;
pub mod identity;
pub mod request_id;
pub mod session;

pub use auth::{
    AuthRejection, LOGIN_PATH, RequireUser, require_login, set_current_user, take_pending_redirect,
};
pub use identity::load_current_user;
pub use request_id::{RequestId, request_id_middleware};
pub use session::{create_session_layer, postgres_session_store};
