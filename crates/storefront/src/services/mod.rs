//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Customer registration and password login

pub mod auth;
