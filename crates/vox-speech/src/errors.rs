//! Transcription error types.

use vox_auth::AuthError;

/// Errors that can occur during a transcription call.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    /// Token acquisition failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// HTTP transport failure: connection, timeout, or body decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The recognition service answered with a non-success status, or
    /// rejected the bearer token twice.
    #[error("recognition service error ({status}): {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Error description from the response body.
        message: String,
    },

    /// The audio exceeds the configured size limit.
    #[error("audio too large: {size} bytes (max {max})")]
    TooLarge {
        /// Size of the rejected audio.
        size: usize,
        /// Configured limit.
        max: usize,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
