//! # vox-auth
//!
//! OAuth token issuance and caching for the speech recognition service.
//!
//! The recognition API authenticates every call with a short-lived bearer
//! token obtained from a separate OAuth endpoint. This crate owns that
//! protocol:
//!
//! - [`OAuthConfig`]: endpoint, Basic credential, scope, timeout
//! - [`TokenCache`]: the single cached token slot with a 5-minute expiry
//!   safety margin and single-flight refresh
//!
//! Token acquisition failures are never retried here; the caller decides
//! whether a failed call is worth a second attempt.

#![deny(unsafe_code)]

pub mod errors;
pub mod oauth;
pub mod token;

pub use errors::AuthError;
pub use oauth::{DEFAULT_LIFETIME_SECS, OAuthConfig};
pub use token::{BearerToken, SAFETY_MARGIN_MS, TokenCache};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
