//! Conversation-session control interface.
//!
//! The orchestrating layer owns the session lifecycle; components that need
//! to observe or interrupt it receive a `&dyn SessionControl` at
//! construction time. Ownership stays acyclic: nothing below the
//! orchestrator reaches back up to resolve session state at runtime.

/// Control surface of one conversation session.
pub trait SessionControl {
    /// Stop the session. Idempotent.
    fn stop(&self);

    /// Flag the session as interrupted by the user; the next turn boundary
    /// observes the flag and abandons queued work.
    fn mark_interrupt(&self);

    /// Whether the session is still accepting work.
    fn is_running(&self) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
