//! Persisted admin session record.
//!
//! A single record keyed by [`SESSION_STORAGE_KEY`], shape
//! `{timestamp: epoch-ms, expiry: epoch-ms}`. Validity is pure logic here;
//! ownership, persistence and the periodic re-check live in the admin
//! crate's session gate.

use chrono::{DateTime, Utc};
use chrono::serde::ts_milliseconds;
use serde::{Deserialize, Serialize};

/// Fixed storage key for the persisted session record.
pub const SESSION_STORAGE_KEY: &str = "admin_session";

/// Absolute session lifetime: 3 hours, in milliseconds.
pub const SESSION_LIFETIME: i64 = 3 * 60 * 60 * 1000;

/// Inactivity window: 30 minutes, in milliseconds.
pub const INACTIVITY_WINDOW: i64 = 30 * 60 * 1000;

/// Locally cached proof of administrative authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Authentication instant (epoch milliseconds on the wire).
    #[serde(with = "ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Absolute instant after which the session is void.
    #[serde(with = "ts_milliseconds")]
    pub expiry: DateTime<Utc>,
}

impl AdminSession {
    /// Create a fresh session starting at `now`.
    #[must_use]
    pub fn begin(now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            expiry: now + chrono::Duration::milliseconds(SESSION_LIFETIME),
        }
    }

    /// Session validity at `now`, measuring inactivity from the persisted
    /// authentication timestamp.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_valid_with_activity(now, self.timestamp)
    }

    /// Session validity at `now`, measuring inactivity from an explicit
    /// last-activity instant.
    ///
    /// The expiry instant itself is invalid; inactivity of exactly the
    /// window is still valid (the rule is `now - activity > window`).
    #[must_use]
    pub fn is_valid_with_activity(
        &self,
        now: DateTime<Utc>,
        last_activity: DateTime<Utc>,
    ) -> bool {
        if now >= self.expiry {
            return false;
        }
        (now - last_activity).num_milliseconds() <= INACTIVITY_WINDOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 12, 10, 0, 0).single().expect("valid date")
    }

    #[test]
    fn test_begin_sets_three_hour_expiry() {
        let now = start();
        let session = AdminSession::begin(now);
        assert_eq!(session.timestamp, now);
        assert_eq!(session.expiry, now + Duration::hours(3));
    }

    #[test]
    fn test_exact_expiry_instant_is_invalid() {
        let session = AdminSession::begin(start());
        assert!(!session.is_valid(session.expiry));
        // fresh activity does not help at the expiry instant
        assert!(!session.is_valid_with_activity(session.expiry, session.expiry));
        // one millisecond before expiry, with fresh activity, is still valid
        let just_before = session.expiry - Duration::milliseconds(1);
        assert!(session.is_valid_with_activity(just_before, just_before));
    }

    #[test]
    fn test_inactivity_window_boundaries() {
        let now = start();
        let session = AdminSession::begin(now);
        assert!(session.is_valid(now + Duration::minutes(29)));
        assert!(session.is_valid(now + Duration::minutes(30)));
        assert!(!session.is_valid(now + Duration::minutes(31)));
    }

    #[test]
    fn test_activity_marker_extends_inactivity_only() {
        let now = start();
        let session = AdminSession::begin(now);
        let later = now + Duration::hours(2);
        // stale login timestamp, but recent activity
        assert!(session.is_valid_with_activity(later, later - Duration::minutes(5)));
        // recent activity cannot outlive the absolute expiry
        let past_expiry = now + Duration::hours(4);
        assert!(!session.is_valid_with_activity(past_expiry, past_expiry));
    }

    #[test]
    fn test_epoch_ms_wire_shape() {
        let session = AdminSession::begin(start());
        let value = serde_json::to_value(session).expect("serialize");
        assert!(value["timestamp"].is_i64());
        assert!(value["expiry"].is_i64());
        assert_eq!(
            value["expiry"].as_i64().expect("ms") - value["timestamp"].as_i64().expect("ms"),
            SESSION_LIFETIME
        );
    }
}
