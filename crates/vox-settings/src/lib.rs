//! # vox-settings
//!
//! Layered configuration for the vox transcription gateway.
//!
//! Settings are resolved from three sources, lowest priority first:
//! 1. Compiled [`VoxSettings::default()`]
//! 2. `~/.vox/settings.json`, deep-merged over the defaults
//! 3. `VOX_*` environment variables
//!
//! The speech feature ships disabled: until a credential and the service
//! URLs are configured, [`VoxSettings`] describes an inert gateway and the
//! client constructors return `None` rather than erroring.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::{OAuthSettings, SpeechSettings, TranscodeSettings, VoxSettings};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_inert_gateway() {
        let settings = VoxSettings::default();
        assert!(!settings.speech.enabled);
        assert!(settings.oauth.authorization_key.is_none());
        assert!(settings.oauth.client_id.is_none());
    }
}
