//! The OAuth token-issuance request.
//!
//! One POST to the identity endpoint: Basic credential, a fresh
//! `X-Request-ID` correlation header, and a form-encoded scope. The
//! response carries `access_token` and an optional `expires_at` lifetime
//! in seconds; absent lifetimes default to [`DEFAULT_LIFETIME_SECS`].

use std::time::Duration;

use base64::Engine;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use vox_core::{RequestId, now_ms};
use vox_settings::OAuthSettings;

use crate::errors::AuthError;
use crate::token::BearerToken;

/// Token lifetime assumed when the response omits `expires_at`.
pub const DEFAULT_LIFETIME_SECS: i64 = 1800;

/// Settings for one token-issuance call.
#[derive(Clone, Debug)]
pub struct OAuthConfig {
    /// Token endpoint URL.
    pub token_url: String,
    /// Pre-encoded Basic credential (the part after `Basic `).
    pub credential: String,
    /// Scope value sent with every issuance request.
    pub scope: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OAuthConfig {
    /// Build a config with the default 30s timeout.
    pub fn new(
        token_url: impl Into<String>,
        credential: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            credential: credential.into(),
            scope: scope.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build a config from loaded settings.
    ///
    /// Returns `None` when no token URL or no credential is configured;
    /// the feature is then inert rather than erroring later. A pre-encoded
    /// `authorization_key` wins over the `client_id`/`client_secret` pair,
    /// which is Base64-encoded as `id:secret` the way Basic auth expects.
    pub fn from_settings(settings: &OAuthSettings) -> Option<Self> {
        if settings.token_url.is_empty() {
            return None;
        }
        let credential = match (
            &settings.authorization_key,
            &settings.client_id,
            &settings.client_secret,
        ) {
            (Some(key), _, _) => key.clone(),
            (None, Some(id), Some(secret)) => {
                base64::engine::general_purpose::STANDARD.encode(format!("{id}:{secret}"))
            }
            _ => return None,
        };
        Some(Self {
            token_url: settings.token_url.clone(),
            credential,
            scope: settings.scope.clone(),
            timeout: Duration::from_millis(settings.timeout_ms),
        })
    }
}

/// Token endpoint response. `expires_at` is a lifetime in seconds.
#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_at: Option<i64>,
}

/// Request one fresh token from the identity endpoint.
///
/// Not retried here: a transport error or a non-2xx answer surfaces as
/// [`AuthError`] with the cause preserved, and the caller owns any retry.
#[tracing::instrument(skip_all, fields(token_url = %config.token_url))]
pub async fn request_token(
    client: &reqwest::Client,
    config: &OAuthConfig,
) -> Result<BearerToken, AuthError> {
    let request_id = RequestId::new();
    tracing::debug!(request_id = %request_id, "requesting bearer token");

    let resp = client
        .post(&config.token_url)
        .timeout(config.timeout)
        .header(AUTHORIZATION, basic_header(&config.credential)?)
        .header("X-Request-ID", request_id.as_str())
        .form(&[("scope", config.scope.as_str())])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(AuthError::OAuth {
            status: status.as_u16(),
            message,
        });
    }

    let data: TokenResponse = resp.json().await?;
    if data.access_token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let lifetime_secs = data.expires_at.unwrap_or(DEFAULT_LIFETIME_SECS);
    Ok(BearerToken {
        value: data.access_token,
        expires_at_ms: now_ms() + lifetime_secs * 1000,
    })
}

fn basic_header(credential: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(&format!("Basic {credential}")).map_err(|_| AuthError::NotConfigured)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
