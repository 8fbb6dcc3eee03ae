//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::CredentialStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// credential store. Request-specific data (the current user) is never kept
/// here; it travels in the request extensions.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Box<dyn CredentialStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store (`PostgreSQL` in production, in-memory in tests)
    #[must_use]
    pub fn new(store: impl CredentialStore + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Box::new(store),
            }),
        }
    }

    /// Get a reference to the credential store.
    #[must_use]
    pub fn store(&self) -> &dyn CredentialStore {
        self.inner.store.as_ref()
    }
}
