//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`VoxSettings::default()`]
//! 2. If `~/.vox/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::VoxSettings;

/// Resolve the path to the settings file (`~/.vox/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".vox").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<VoxSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<VoxSettings> {
    let defaults = serde_json::to_value(VoxSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: VoxSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules:
/// - Integers must be valid and within the specified range
/// - Booleans accept: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
/// - Invalid values are silently ignored (fall back to file/default)
pub fn apply_env_overrides(settings: &mut VoxSettings) {
    // ── OAuth settings ──────────────────────────────────────────────
    if let Some(v) = read_env_string("VOX_TOKEN_URL") {
        settings.oauth.token_url = v;
    }
    if let Some(v) = read_env_string("VOX_AUTH_KEY") {
        settings.oauth.authorization_key = Some(v);
    }
    if let Some(v) = read_env_string("VOX_CLIENT_ID") {
        settings.oauth.client_id = Some(v);
    }
    if let Some(v) = read_env_string("VOX_CLIENT_SECRET") {
        settings.oauth.client_secret = Some(v);
    }
    if let Some(v) = read_env_string("VOX_SCOPE") {
        settings.oauth.scope = v;
    }
    if let Some(v) = read_env_u64("VOX_OAUTH_TIMEOUT_MS", 1000, 600_000) {
        settings.oauth.timeout_ms = v;
    }

    // ── Speech settings ─────────────────────────────────────────────
    if let Some(v) = read_env_bool("VOX_SPEECH_ENABLED") {
        settings.speech.enabled = v;
    }
    if let Some(v) = read_env_string("VOX_RECOGNIZE_URL") {
        settings.speech.recognize_url = v;
    }
    if let Some(v) = read_env_string("VOX_CONTENT_TYPE") {
        settings.speech.content_type = v;
    }
    if let Some(v) = read_env_u64("VOX_SPEECH_TIMEOUT_MS", 1000, 600_000) {
        settings.speech.timeout_ms = v;
    }
    if let Some(v) = read_env_u64("VOX_SPEECH_MAX_BYTES", 1024, 1_073_741_824) {
        settings.speech.max_bytes = v;
    }

    // ── Transcode settings ──────────────────────────────────────────
    if let Some(v) = read_env_string("VOX_FFMPEG_PATH") {
        settings.transcode.ffmpeg_path = v;
    }
    if let Some(v) = read_env_string("VOX_SOURCE_FORMAT") {
        settings.transcode.source_format = v;
    }
    if let Some(v) = read_env_string("VOX_TARGET_FORMAT") {
        settings.transcode.target_format = v;
    }
    if let Some(v) = read_env_u32("VOX_BITRATE_KBPS", 8, 512) {
        settings.transcode.bitrate_kbps = v;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Env parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a boolean from its accepted string forms.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a `u64` constrained to `[min, max]`.
fn parse_u64_range(raw: &str, min: u64, max: u64) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|v| (min..=max).contains(v))
}

/// Parse a `u32` constrained to `[min, max]`.
fn parse_u32_range(raw: &str, min: u32, max: u32) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|v| (min..=max).contains(v))
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_bool(name: &str) -> Option<bool> {
    let val = std::env::var(name).ok()?;
    let result = parse_bool(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid bool env var, ignoring");
    }
    result
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

fn read_env_u32(name: &str, min: u32, max: u32) -> Option<u32> {
    let val = std::env::var(name).ok()?;
    let result = parse_u32_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u32 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
