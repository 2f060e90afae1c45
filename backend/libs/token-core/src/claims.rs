//! Claim set carried inside every credential
//!
//! The payload is `{"user_id": <u64>, "exp": <unix seconds>}`. Decoding also
//! accepts `subject` and `expiresAt` for tokens minted by other issuers.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Window used by [`TokenIssuer::issue`](crate::TokenIssuer::issue)
pub const STANDARD_VALIDITY: Duration = Duration::hours(72);

/// Window used by [`TokenIssuer::issue_short_lived`](crate::TokenIssuer::issue_short_lived)
pub const SHORT_VALIDITY: Duration = Duration::hours(24);

/// Subject identifier and expiry of a credential
///
/// `subject` keeps the full `u64` range: serde_json writes it as an integer
/// literal and reads it back without going through `f64`. Issuers whose JSON
/// numbers are doubles (JavaScript, for example) only round-trip subjects up to
/// 2^53 - 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    #[serde(rename = "user_id", alias = "subject")]
    pub subject: u64,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(rename = "exp", alias = "expiresAt")]
    pub expires_at: i64,
}

impl ClaimSet {
    /// Claims for `subject` expiring `validity` after `now`
    ///
    /// Sub-second precision of `now` is dropped. `validity` must be positive;
    /// the issuer only passes its configured windows.
    pub fn new(subject: u64, now: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            subject,
            expires_at: now.timestamp() + validity.num_seconds(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    /// Expired unless `expires_at` is strictly after `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp()
    }
}
