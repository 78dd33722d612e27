//! vox CLI: convert a voice note with ffmpeg and transcribe it through
//! the OAuth-protected recognition service.
//!
//! This binary is the orchestrating layer: it owns the session flag, maps
//! client outcomes onto audit events, and degrades to a no-op when the
//! gateway is unconfigured.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use clap::{Parser, Subcommand};
use vox_core::{AuditEvent, AuditKind, AuditSink, SessionControl, TracingAuditSink};
use vox_speech::{SpeechClient, TranscriptionError};
use vox_transcode::{AudioFormat, Transcoder};

#[derive(Parser)]
#[command(name = "vox", version, about = "Voice-note transcription gateway")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe a voice recording file.
    Transcribe {
        /// Path to the voice recording.
        file: PathBuf,
        /// Container format of the recording (defaults to settings).
        #[arg(long)]
        source_format: Option<String>,
    },
}

/// Session flag flipped by the Ctrl-C handler.
struct CliSession {
    running: AtomicBool,
    interrupted: AtomicBool,
}

impl CliSession {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            interrupted: AtomicBool::new(false),
        }
    }
}

impl SessionControl for CliSession {
    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn mark_interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Transcribe {
            file,
            source_format,
        } => transcribe(file, source_format).await,
    }
}

async fn transcribe(file: PathBuf, source_format: Option<String>) -> anyhow::Result<()> {
    let settings = vox_settings::load_settings()?;

    // Unconfigured means inert, not an error.
    let Some(client) = SpeechClient::from_settings(&settings) else {
        tracing::info!("transcription is not configured; nothing to do");
        return Ok(());
    };

    let session = Arc::new(CliSession::new());
    let watcher_session = Arc::clone(&session);
    let _ = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher_session.mark_interrupt();
            watcher_session.stop();
        }
    });

    let audit = TracingAuditSink;

    let audio = tokio::fs::read(&file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;

    let source = AudioFormat::from_name(
        source_format
            .as_deref()
            .unwrap_or(&settings.transcode.source_format),
    )?;
    let target = AudioFormat::from_name(&settings.transcode.target_format)?;

    let transcoder = Transcoder::from_settings(&settings.transcode);
    let converted = match transcoder
        .convert(&audio, source, target, settings.transcode.bitrate_kbps)
        .await
    {
        Ok(bytes) => bytes,
        Err(e) => {
            audit.record(&AuditEvent::new(
                AuditKind::Error,
                "vox",
                format!("conversion failed: {e}"),
            ));
            return Err(e.into());
        }
    };

    if !session.is_running() {
        tracing::info!("interrupted before recognition, abandoning");
        return Ok(());
    }

    match client.transcribe(&converted).await {
        Ok(text) if text.is_empty() => {
            audit.record(&AuditEvent::new(AuditKind::Message, "vox", "no speech detected"));
        }
        Ok(text) => {
            audit.record(&AuditEvent::new(
                AuditKind::Message,
                "vox",
                "voice note transcribed",
            ));
            println!("{text}");
        }
        Err(e) => {
            audit.record(&AuditEvent::new(
                audit_kind_for(&e),
                "vox",
                format!("transcription failed: {e}"),
            ));
            return Err(e.into());
        }
    }
    Ok(())
}

/// Which audit kind a transcription failure maps to.
fn audit_kind_for(error: &TranscriptionError) -> AuditKind {
    match error {
        TranscriptionError::Auth(_) => AuditKind::Auth,
        TranscriptionError::Service { status: 429, .. } => AuditKind::RateLimit,
        _ => AuditKind::Error,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vox_auth::AuthError;

    #[test]
    fn auth_failures_audit_as_auth() {
        let err = TranscriptionError::Auth(AuthError::MissingToken);
        assert_eq!(audit_kind_for(&err), AuditKind::Auth);
    }

    #[test]
    fn rate_limits_audit_as_rate_limit() {
        let err = TranscriptionError::Service {
            status: 429,
            message: "slow down".into(),
        };
        assert_eq!(audit_kind_for(&err), AuditKind::RateLimit);
    }

    #[test]
    fn other_failures_audit_as_error() {
        let err = TranscriptionError::Service {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(audit_kind_for(&err), AuditKind::Error);
    }

    #[test]
    fn ctrl_c_session_stops() {
        let session = CliSession::new();
        assert!(session.is_running());
        session.mark_interrupt();
        session.stop();
        assert!(!session.is_running());
        assert!(session.interrupted.load(Ordering::SeqCst));
    }
}
