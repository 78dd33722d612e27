//! # vox-core
//!
//! Foundation types shared across the vox transcription gateway:
//!
//! - [`RequestId`]: per-request correlation identifier
//! - [`AuditEvent`] / [`AuditSink`]: outcome reporting to the hosting layer
//! - [`SessionControl`]: injected conversation-session interface
//! - [`now_ms`]: epoch-millis clock helper
//!
//! ## Crate Position
//!
//! Standalone (no vox crate dependencies). Depended on by every other crate
//! in the workspace.

#![deny(unsafe_code)]

pub mod events;
pub mod ids;
pub mod session;
pub mod time;

pub use events::{AuditEvent, AuditKind, AuditSink, TracingAuditSink};
pub use ids::RequestId;
pub use session::SessionControl;
pub use time::now_ms;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
