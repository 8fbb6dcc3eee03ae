//! Domain models for storefront.

pub mod customer;
pub mod session;

pub use customer::{AuthenticationRecord, Customer};
pub use session::{CurrentUser, keys as session_keys};
