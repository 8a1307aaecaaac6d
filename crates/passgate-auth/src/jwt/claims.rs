//! JWT claims structure carried by every bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token is bound to.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the issue time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether the token is expired at `now`. The expiry instant itself
    /// counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        u64::try_from(remaining).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat: i64, exp: i64) -> Claims {
        Claims {
            sub: "alice".to_string(),
            iat,
            exp,
        }
    }

    #[test]
    fn test_boundary_is_expired() {
        let c = claims(1_000, 1_060);
        let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
        assert!(!c.is_expired_at(at(1_059)));
        assert!(c.is_expired_at(at(1_060)));
        assert!(c.is_expired_at(at(1_061)));
    }

    #[test]
    fn test_subsecond_before_boundary_is_valid() {
        let c = claims(1_000, 1_060);
        let just_before = DateTime::from_timestamp(1_059, 999_000_000).unwrap();
        assert!(!c.is_expired_at(just_before));
    }

    #[test]
    fn test_remaining_ttl_of_live_token() {
        let now = Utc::now().timestamp();
        let remaining = claims(now, now + 120).remaining_ttl_seconds();
        assert!((119..=120).contains(&remaining), "remaining: {remaining}");
    }

    #[test]
    fn test_remaining_ttl_of_past_token_is_zero() {
        assert_eq!(claims(0, 1).remaining_ttl_seconds(), 0);
    }
}
