//! # vox-speech
//!
//! Authenticated client for the remote speech recognition service.
//!
//! [`SpeechClient`] composes the token cache from `vox-auth` with the
//! recognition HTTP call and owns the retry-on-expired-token protocol:
//! exactly one retry, taken only when the first attempt comes back 401.
//! An empty transcription is a valid "no speech detected" outcome, never
//! an error.
//!
//! Construction is config-gated: [`SpeechClient::from_settings`] returns
//! `None` when transcription is disabled or unconfigured, so call sites
//! treat the feature as absent instead of handling late failures.

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod types;

pub use client::SpeechClient;
pub use errors::TranscriptionError;
pub use types::RecognitionResult;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
