//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::middleware::RequireUser;

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub user_id: String,
}

/// Display account overview page.
pub async fn index(RequireUser(record): RequireUser) -> impl IntoResponse {
    AccountIndexTemplate {
        user_id: record.user_id.into_inner(),
    }
}
