// src/services/mod.rs
//
// Outbound integrations: identity provider verification and error reporting

pub mod facebook;
pub mod google;
pub mod monitoring;
pub mod verifier;

// Re-export commonly used types for convenience
pub use facebook::FacebookVerifier;
pub use google::GoogleVerifier;
pub use verifier::{build_http_client, ProviderVerifier, VerificationError};
