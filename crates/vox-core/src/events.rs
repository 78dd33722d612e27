//! Audit events reportable to the hosting layer.
//!
//! The gateway crates never construct audit records themselves. They
//! return typed results, and the orchestrating layer maps outcomes onto
//! [`AuditEvent`]s and hands them to whatever [`AuditSink`] it owns.
//! Persisting the records (file, database, remote collector) is the sink
//! implementor's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of audited outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// A user-visible message was produced (e.g. a transcription result).
    Message,
    /// An authentication outcome (token issued, token rejected).
    Auth,
    /// An external tool or service invocation.
    ToolUse,
    /// A terminal failure.
    Error,
    /// The remote service reported rate limiting.
    RateLimit,
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Message => "message",
            Self::Auth => "auth",
            Self::ToolUse => "tool_use",
            Self::Error => "error",
            Self::RateLimit => "rate_limit",
        };
        f.write_str(s)
    }
}

/// One tagged audit record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    /// What kind of outcome this records.
    pub kind: AuditKind,
    /// When the outcome happened.
    pub timestamp: DateTime<Utc>,
    /// Who caused it (user identity, component name).
    pub actor: String,
    /// Human-readable detail, with the original cause message preserved.
    pub detail: String,
}

impl AuditEvent {
    /// Build an event stamped with the current time.
    pub fn new(kind: AuditKind, actor: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            actor: actor.into(),
            detail: detail.into(),
        }
    }
}

/// Destination for audit events.
///
/// Implemented by the hosting layer; the gateway only calls `record`.
pub trait AuditSink {
    /// Record one event. Must not fail; sinks swallow their own errors.
    fn record(&self, event: &AuditEvent);
}

/// An [`AuditSink`] that emits events as structured `tracing` records.
///
/// The default sink for the CLI. Error and rate-limit events map to the
/// matching tracing levels so an `EnvFilter` treats them correctly.
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        match event.kind {
            AuditKind::Error => {
                tracing::error!(kind = %event.kind, actor = %event.actor, "{}", event.detail);
            }
            AuditKind::RateLimit => {
                tracing::warn!(kind = %event.kind, actor = %event.actor, "{}", event.detail);
            }
            _ => {
                tracing::info!(kind = %event.kind, actor = %event.actor, "{}", event.detail);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
