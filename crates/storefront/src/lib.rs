//! Northwind storefront library.
//!
//! Customer registration, login and logout over server-side sessions, plus
//! the identity loader and access guard the rest of the storefront builds on.
//! The binary in `main.rs` wires these pieces to `PostgreSQL`; tests wire them
//! to in-memory stores.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
