//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::models::CurrentUser;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user_id: Option<String>,
}

/// Display the home page, greeting the customer if logged in.
pub async fn home(current_user: CurrentUser) -> impl IntoResponse {
    HomeTemplate {
        user_id: current_user.user_id().map(ToString::to_string),
    }
}
