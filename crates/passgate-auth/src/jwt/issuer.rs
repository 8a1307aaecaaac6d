//! JWT token creation with HMAC-SHA256 signing.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use passgate_core::config::AuthConfig;
use passgate_core::error::AppError;

use super::claims::Claims;

/// Creates signed, time-bounded bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Lifetime used by [`TokenIssuer::issue_default`].
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// A freshly issued token together with its decoded timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWT string (`header.payload.signature`).
    pub token: String,
    /// Username the token is bound to.
    pub subject: String,
    /// Issue time, truncated to whole seconds.
    pub issued_at: DateTime<Utc>,
    /// Expiry time; the token is rejected from this instant on.
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            default_ttl: config.token_ttl(),
        }
    }

    /// Returns the configured default lifetime.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issues a token for `subject` using the configured default lifetime.
    pub fn issue_default(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue(subject, self.default_ttl)
    }

    /// Issues a token for `subject` valid for `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// `ttl` must be at least one second. The expiry is rounded up to the
    /// next whole second, so a token is never valid for less than `ttl`.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        if subject.is_empty() {
            return Err(AppError::invalid_input("Token subject must not be empty"));
        }

        if ttl <= Duration::zero() {
            return Err(AppError::invalid_ttl("Token TTL must be positive"));
        }

        if ttl < Duration::seconds(1) {
            return Err(AppError::invalid_ttl(
                "Token TTL must be at least one second",
            ));
        }

        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::invalid_ttl("Token TTL is out of range"))?;

        let round_up = i64::from(expires_at.timestamp_subsec_nanos() > 0);
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp() + round_up,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            subject: claims.sub.clone(),
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use passgate_core::error::ErrorKind;

    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig::default())
    }

    fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, nanos).unwrap()
    }

    #[test]
    fn test_token_has_three_segments() {
        let issued = issuer().issue("alice", Duration::hours(1)).unwrap();
        assert_eq!(issued.token.split('.').count(), 3);
        assert_eq!(issued.subject, "alice");
    }

    #[test]
    fn test_expiry_is_issue_plus_ttl() {
        let issued = issuer()
            .issue_at("alice", Duration::seconds(90), at(1_000, 0))
            .unwrap();
        assert_eq!(issued.issued_at, at(1_000, 0));
        assert_eq!(issued.expires_at, at(1_090, 0));
    }

    #[test]
    fn test_fractional_expiry_rounds_up() {
        let issued = issuer()
            .issue_at("alice", Duration::seconds(1), at(1_000, 400_000_000))
            .unwrap();
        assert_eq!(issued.issued_at, at(1_000, 0));
        assert_eq!(issued.expires_at, at(1_002, 0));
    }

    #[test]
    fn test_signing_is_deterministic_for_same_inputs() {
        let issuer = issuer();
        let now = at(5_000, 0);
        let a = issuer.issue_at("alice", Duration::minutes(5), now).unwrap();
        let b = issuer.issue_at("alice", Duration::minutes(5), now).unwrap();
        assert_eq!(a.token, b.token);

        let later = issuer
            .issue_at("alice", Duration::minutes(5), at(5_001, 0))
            .unwrap();
        assert_ne!(a.token, later.token);
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let issuer = issuer();
        for ttl in [Duration::zero(), Duration::seconds(-5)] {
            let err = issuer.issue("alice", ttl).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidTtl);
        }
    }

    #[test]
    fn test_subsecond_ttl_rejected() {
        let err = issuer()
            .issue("alice", Duration::milliseconds(500))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTtl);
    }

    #[test]
    fn test_empty_subject_rejected() {
        let err = issuer().issue("", Duration::hours(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_issue_default_uses_configured_ttl() {
        let config = AuthConfig {
            token_ttl_seconds: 120,
            ..AuthConfig::default()
        };
        let issuer = TokenIssuer::new(&config);
        let issued = issuer.issue_default("alice").unwrap();
        let lifetime = issued.expires_at - issued.issued_at;
        assert!(lifetime >= Duration::seconds(120));
        assert!(lifetime <= Duration::seconds(121));
    }
}
