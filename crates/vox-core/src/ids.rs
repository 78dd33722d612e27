//! Per-request correlation identifier.
//!
//! Every outbound OAuth call carries a fresh [`RequestId`] so the remote
//! service can correlate a failed issuance with its own logs. IDs are
//! random UUID v4; the identity endpoint requires uniqueness, not ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unique per-request correlation ID (UUID v4).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new random ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
