//! # Auth Module
//!
//! This module handles the token exchange and session issuance:
//! - Provider claim mapping to internal identities
//! - Session token issuance and validation
//! - The per-provider login flow
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod flow;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod routes;
pub mod token;

#[cfg(test)]
mod tests;

pub use routes::auth_routes;
