//! # Temporal Types
//!
//! Epoch-millisecond timestamp type for the job board. Creation and review
//! times are stored as integer milliseconds since the Unix epoch, matching
//! the persisted JSON format, and rendered as UTC ISO 8601 for display.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A point in time stored as milliseconds since the Unix epoch (UTC).
///
/// Serializes transparently as the integer value, so persisted records stay
/// byte-compatible with collections written by earlier versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Construct from raw epoch milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The raw epoch-millisecond value.
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Convert to a `chrono` UTC datetime, if representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}
