//! Integration test support for the Northwind storefront.
//!
//! The tests under `tests/` talk to a running storefront over HTTP and check
//! the resulting rows directly in `PostgreSQL`.
//!
//! # Running Tests
//!
//! ```bash
//! nw-cli migrate
//! cargo run -p northwind-storefront &
//! cargo test -p northwind-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Storefront address (default `http://localhost:3000`)
//! - `NORTHWIND_DATABASE_URL` (or `DATABASE_URL`) - Database the storefront uses

use reqwest::{Client, redirect};
use sqlx::PgPool;
use uuid::Uuid;

use northwind_storefront::config::StorefrontConfig;
use northwind_storefront::db;

/// Base URL of the storefront under test.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A browser-like client: keeps cookies, does not follow redirects.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A user id no other test run will collide with.
#[must_use]
pub fn unique_user_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Connect to the storefront database.
///
/// # Panics
///
/// Panics if the database URL is missing or the database is unreachable.
pub async fn database() -> PgPool {
    let url = StorefrontConfig::database_url_from_env().expect("Database URL not configured");
    db::create_pool(&url)
        .await
        .expect("Failed to connect to database")
}
