//! Northwind Core - Shared types library.
//!
//! This crate provides the domain types shared by the Northwind components:
//! - `storefront` - Public-facing site (registration, login, sessions)
//! - `cli` - Command-line tools for migrations and customer management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Case-folded customer identifiers and the post-action redirect allow-list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
