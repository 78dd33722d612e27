//! The cached bearer token slot.
//!
//! At most one token is outstanding at any time. The slot sits behind an
//! async mutex held across the freshness check *and* the refresh request,
//! so concurrent cold-cache callers await the one in-flight issuance
//! instead of racing to the OAuth endpoint.

use tokio::sync::Mutex;
use vox_core::now_ms;

use crate::errors::AuthError;
use crate::oauth::{self, OAuthConfig};

/// Margin subtracted from a token's expiry before handing it out.
///
/// The recognition call itself can take several seconds; a token that is
/// valid now but expires mid-flight must not be used.
pub const SAFETY_MARGIN_MS: i64 = 5 * 60 * 1000;

/// One issued bearer token and its absolute expiry.
#[derive(Clone, Debug)]
pub struct BearerToken {
    /// The token value presented as `Authorization: Bearer <value>`.
    pub value: String,
    /// Absolute expiry, epoch millis.
    pub expires_at_ms: i64,
}

impl BearerToken {
    /// Whether the token is still safely usable at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: i64) -> bool {
        now < self.expires_at_ms - SAFETY_MARGIN_MS
    }
}

/// The single source of truth for "is this token still usable".
///
/// Refresh never mutates a handed-out token in place: a new
/// [`BearerToken`] is built from the OAuth response and atomically
/// replaces the slot.
pub struct TokenCache {
    config: OAuthConfig,
    client: reqwest::Client,
    slot: Mutex<Option<BearerToken>>,
}

impl TokenCache {
    /// Create an empty cache for the given OAuth settings.
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            slot: Mutex::new(None),
        }
    }

    /// Return a usable token value, refreshing if the cached one is absent
    /// or inside its expiry margin.
    ///
    /// Issuance failures are not retried here (the caller owns retry).
    pub async fn get_token(&self) -> Result<String, AuthError> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_fresh(now_ms()) {
                return Ok(token.value.clone());
            }
            tracing::debug!("cached token inside expiry margin, refreshing");
        }

        let fresh = oauth::request_token(&self.client, &self.config).await?;
        tracing::info!(expires_at_ms = fresh.expires_at_ms, "bearer token refreshed");
        let value = fresh.value.clone();
        *slot = Some(fresh);
        Ok(value)
    }

    /// Drop the cached token so the next call must refresh.
    ///
    /// Called when the recognition service rejects a token the cache still
    /// considered fresh.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
        tracing::debug!("bearer token invalidated");
    }

    #[cfg(test)]
    async fn seed(&self, token: BearerToken) {
        *self.slot.lock().await = Some(token);
    }

    #[cfg(test)]
    async fn cached(&self) -> Option<BearerToken> {
        self.slot.lock().await.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cache_for(server: &MockServer) -> TokenCache {
        TokenCache::new(OAuthConfig::new(
            format!("{}/oauth/token", server.uri()),
            "Y3JlZA==",
            "speech",
        ))
    }

    fn token_mock(value: &str) -> Mock {
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({
                "access_token": value,
                "expires_at": 1800
            }),
        ))
    }

    // ── freshness ───────────────────────────────────────────────────

    #[test]
    fn fresh_outside_margin() {
        let token = BearerToken {
            value: "t".into(),
            expires_at_ms: now_ms() + SAFETY_MARGIN_MS + 60_000,
        };
        assert!(token.is_fresh(now_ms()));
    }

    #[test]
    fn stale_inside_margin() {
        let token = BearerToken {
            value: "t".into(),
            expires_at_ms: now_ms() + SAFETY_MARGIN_MS - 1_000,
        };
        assert!(!token.is_fresh(now_ms()));
    }

    #[test]
    fn stale_after_expiry() {
        let token = BearerToken {
            value: "t".into(),
            expires_at_ms: now_ms() - 1,
        };
        assert!(!token.is_fresh(now_ms()));
    }

    // ── cache behavior ──────────────────────────────────────────────

    #[tokio::test]
    async fn warm_cache_skips_network() {
        let server = MockServer::start().await;
        // Any request at all would violate the expectation.
        token_mock("never").expect(0).mount(&server).await;

        let cache = cache_for(&server);
        cache
            .seed(BearerToken {
                value: "seeded".into(),
                expires_at_ms: now_ms() + 3_600_000,
            })
            .await;

        assert_eq!(cache.get_token().await.unwrap(), "seeded");
        assert_eq!(cache.get_token().await.unwrap(), "seeded");
    }

    #[tokio::test]
    async fn cold_cache_issues_one_request_then_reuses() {
        let server = MockServer::start().await;
        token_mock("tok-a").expect(1).mount(&server).await;

        let cache = cache_for(&server);
        assert_eq!(cache.get_token().await.unwrap(), "tok-a");
        assert_eq!(cache.get_token().await.unwrap(), "tok-a");
    }

    #[tokio::test]
    async fn stale_token_is_replaced() {
        let server = MockServer::start().await;
        token_mock("tok-new").expect(1).mount(&server).await;

        let cache = cache_for(&server);
        cache
            .seed(BearerToken {
                value: "tok-old".into(),
                expires_at_ms: now_ms() + SAFETY_MARGIN_MS - 1_000,
            })
            .await;

        assert_eq!(cache.get_token().await.unwrap(), "tok-new");
        let cached = cache.cached().await.unwrap();
        assert_eq!(cached.value, "tok-new");
        assert!(cached.is_fresh(now_ms()));
    }

    #[tokio::test]
    async fn invalidate_forces_refresh() {
        let server = MockServer::start().await;
        token_mock("tok-b").expect(2).mount(&server).await;

        let cache = cache_for(&server);
        let _ = cache.get_token().await.unwrap();
        cache.invalidate().await;
        assert!(cache.cached().await.is_none());
        let _ = cache.get_token().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_cold_callers_share_one_refresh() {
        let server = MockServer::start().await;
        token_mock("tok-c").expect(1).mount(&server).await;

        let cache = cache_for(&server);
        let (a, b) = tokio::join!(cache.get_token(), cache.get_token());
        assert_eq!(a.unwrap(), "tok-c");
        assert_eq!(b.unwrap(), "tok-c");
    }

    #[tokio::test]
    async fn issuance_failure_leaves_cache_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let cache = cache_for(&server);
        let err = cache.get_token().await.unwrap_err();
        assert!(matches!(err, AuthError::OAuth { status: 503, .. }));
        assert!(cache.cached().await.is_none());
    }
}
