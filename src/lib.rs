//! Eroz Backend Library
//!
//! REST backend for the Eroz medical-imaging training site: registration,
//! login, role-gated user administration, and mock training exercises.
//! Exposes core modules for use by the binary and integration tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod guard;
pub mod middleware;
