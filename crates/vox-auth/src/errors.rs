//! Auth error types.

/// Errors that can occur while acquiring a bearer token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// HTTP transport failure: connection, timeout, or body decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The OAuth endpoint answered with a non-success status.
    #[error("OAuth error ({status}): {message}")]
    OAuth {
        /// HTTP status code.
        status: u16,
        /// Error description from the response body.
        message: String,
    },

    /// The OAuth endpoint answered 2xx but no usable token was present.
    #[error("OAuth response contained no access token")]
    MissingToken,

    /// No credential is configured for token issuance.
    #[error("no OAuth credential configured")]
    NotConfigured,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_error_display() {
        let err = AuthError::OAuth {
            status: 403,
            message: "invalid scope".to_string(),
        };
        assert_eq!(err.to_string(), "OAuth error (403): invalid scope");
    }

    #[test]
    fn missing_token_display() {
        assert_eq!(
            AuthError::MissingToken.to_string(),
            "OAuth response contained no access token"
        );
    }

    #[test]
    fn not_configured_display() {
        assert!(AuthError::NotConfigured.to_string().contains("no OAuth credential"));
    }
}
