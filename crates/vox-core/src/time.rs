//! Epoch-millis clock helper.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as milliseconds since the Unix epoch.
///
/// All expiry math in the workspace is done on epoch millis so that token
/// lifetimes survive serialization without timezone concerns.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_ms_is_positive() {
        assert!(now_ms() > 1_500_000_000_000); // after mid-2017
    }

    #[test]
    fn now_ms_does_not_go_backwards() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
