//! Typed settings structures.
//!
//! All structs carry `#[serde(default)]` so a partial settings file only
//! overrides the keys it names; the loader deep-merges the file over the
//! compiled defaults before deserializing.

use serde::{Deserialize, Serialize};

/// Root settings for the vox gateway.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoxSettings {
    /// OAuth token-issuance settings.
    pub oauth: OAuthSettings,
    /// Speech-recognition endpoint settings.
    pub speech: SpeechSettings,
    /// Audio format-conversion settings.
    pub transcode: TranscodeSettings,
}

/// OAuth token-issuance settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OAuthSettings {
    /// Token endpoint URL.
    pub token_url: String,
    /// Pre-encoded Basic credential. Takes priority over the id/secret pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_key: Option<String>,
    /// OAuth client ID, combined with `client_secret` when no
    /// `authorization_key` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Scope value sent with every issuance request.
    pub scope: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            token_url: String::new(),
            authorization_key: None,
            client_id: None,
            client_secret: None,
            scope: "speech".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Speech-recognition endpoint settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechSettings {
    /// Whether transcription is enabled at all.
    pub enabled: bool,
    /// Recognition endpoint URL.
    pub recognize_url: String,
    /// Content type of the audio body the service accepts.
    pub content_type: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum audio size in bytes.
    pub max_bytes: u64,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            recognize_url: String::new(),
            content_type: "audio/mpeg".to_string(),
            timeout_ms: 30_000,
            max_bytes: 26_214_400,
        }
    }
}

/// Audio format-conversion settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscodeSettings {
    /// Path to the ffmpeg binary.
    pub ffmpeg_path: String,
    /// Container format voice notes arrive in.
    pub source_format: String,
    /// Container format the recognition service accepts.
    pub target_format: String,
    /// Target audio bitrate in kbit/s.
    pub bitrate_kbps: u32,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            source_format: "ogg".to_string(),
            target_format: "mp3".to_string(),
            bitrate_kbps: 128,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
