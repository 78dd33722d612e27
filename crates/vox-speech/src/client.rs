//! The authenticated transcription client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use vox_auth::{OAuthConfig, TokenCache};
use vox_settings::VoxSettings;

use crate::errors::TranscriptionError;
use crate::types::{RecognitionResponse, RecognitionResult};

/// Outcome of one recognition attempt. A 401 is not yet an error; the
/// caller decides whether another attempt is permitted.
enum Attempt {
    Done(RecognitionResult),
    Unauthorized { message: String },
}

/// Client for the OAuth-protected recognition endpoint.
///
/// Owns the token cache and the retry protocol: one `transcribe` call
/// makes at most two recognition requests, the second only after a 401
/// invalidated the cached token.
pub struct SpeechClient {
    http: reqwest::Client,
    tokens: TokenCache,
    recognize_url: String,
    content_type: String,
    timeout: Duration,
    max_bytes: usize,
}

impl SpeechClient {
    /// Create a client from explicit parts.
    #[must_use]
    pub fn new(
        oauth: OAuthConfig,
        recognize_url: impl Into<String>,
        content_type: impl Into<String>,
        timeout: Duration,
        max_bytes: usize,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            tokens: TokenCache::new(oauth),
            recognize_url: recognize_url.into(),
            content_type: content_type.into(),
            timeout,
            max_bytes,
        }
    }

    /// Create a client from loaded settings.
    ///
    /// Returns `None` when transcription is disabled, the recognition URL
    /// is missing, or no OAuth credential is configured. The feature is
    /// then inert and call sites skip it entirely.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_settings(settings: &VoxSettings) -> Option<Self> {
        if !settings.speech.enabled {
            tracing::debug!("transcription disabled in settings");
            return None;
        }
        if settings.speech.recognize_url.is_empty() {
            tracing::debug!("transcription enabled but no recognition URL configured");
            return None;
        }
        let oauth = OAuthConfig::from_settings(&settings.oauth)?;
        Some(Self::new(
            oauth,
            settings.speech.recognize_url.clone(),
            settings.speech.content_type.clone(),
            Duration::from_millis(settings.speech.timeout_ms),
            settings.speech.max_bytes as usize,
        ))
    }

    /// Transcribe converted audio, returning the recognized text.
    ///
    /// Empty text is a successful "no speech detected" outcome.
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        self.recognize(audio).await.map(|r| r.text)
    }

    /// Transcribe converted audio, returning text plus confidence.
    ///
    /// Protocol: acquire a token, send the audio, and on a first-attempt
    /// 401 invalidate the cache and repeat exactly once. A second 401 is
    /// terminal; any other failure is never retried.
    #[tracing::instrument(skip_all, fields(bytes = audio.len()))]
    pub async fn recognize(&self, audio: &[u8]) -> Result<RecognitionResult, TranscriptionError> {
        if audio.len() > self.max_bytes {
            return Err(TranscriptionError::TooLarge {
                size: audio.len(),
                max: self.max_bytes,
            });
        }

        match self.attempt(audio).await? {
            Attempt::Done(result) => Ok(result),
            Attempt::Unauthorized { .. } => {
                tracing::warn!("recognition rejected the bearer token, refreshing and retrying");
                self.tokens.invalidate().await;
                match self.attempt(audio).await? {
                    Attempt::Done(result) => Ok(result),
                    Attempt::Unauthorized { message } => Err(TranscriptionError::Service {
                        status: StatusCode::UNAUTHORIZED.as_u16(),
                        message,
                    }),
                }
            }
        }
    }

    /// One recognition request with the current token.
    async fn attempt(&self, audio: &[u8]) -> Result<Attempt, TranscriptionError> {
        let token = self.tokens.get_token().await?;

        let resp = self
            .http
            .post(&self.recognize_url)
            .timeout(self.timeout)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, &self.content_type)
            .body(audio.to_vec())
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            let message = resp.text().await.unwrap_or_default();
            return Ok(Attempt::Unauthorized { message });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TranscriptionError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: RecognitionResponse = resp.json().await?;
        let result = body.into_result();
        tracing::debug!(
            chars = result.text.len(),
            confidence = result.confidence,
            "recognition complete"
        );
        Ok(Attempt::Done(result))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
