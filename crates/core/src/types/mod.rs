//! Core types for Northwind.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer_id;
pub mod redirect;

pub use customer_id::{CustomerId, CustomerIdError};
pub use redirect::RedirectTarget;
