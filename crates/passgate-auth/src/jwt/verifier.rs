//! JWT token validation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use passgate_core::config::AuthConfig;
use passgate_core::error::{AppError, ErrorKind};

use super::claims::Claims;

/// Validates bearer tokens and recovers the bound username.
///
/// Checks run in a fixed order:
/// 1. Three-segment structure with base64url header and payload
///    (`MalformedToken`)
/// 2. Signature, with HS256 pinned (`BadSignature`)
/// 3. Expiry, exclusive at `exp` with no leeway (`Expired`)
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature and required-claim validation settings.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the verifier's own clock.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a token and returns its subject.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        self.verify_claims(token).map(|claims| claims.sub)
    }

    /// Verifies a token and returns its full claims.
    pub fn verify_claims(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(AppError::malformed_token(
                "Token must have three non-empty segments",
            ));
        }

        // Past this point a base64 failure can only come from the signature.
        for (name, segment) in [("header", segments[0]), ("payload", segments[1])] {
            URL_SAFE_NO_PAD.decode(segment).map_err(|e| {
                AppError::with_source(
                    ErrorKind::MalformedToken,
                    format!("Token {name} is not valid base64url"),
                    e,
                )
            })?;
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?
            .claims;

        if claims.is_expired_at(now) {
            return Err(AppError::expired("Token has expired"));
        }

        Ok(claims)
    }
}

/// Maps a `jsonwebtoken` failure onto the verifier's error kinds.
fn map_decode_error(err: jsonwebtoken::errors::Error) -> AppError {
    let (kind, message) = match err.kind() {
        JwtErrorKind::InvalidSignature | JwtErrorKind::Base64(_) => {
            (ErrorKind::BadSignature, "Invalid token signature")
        }
        JwtErrorKind::InvalidAlgorithm
        | JwtErrorKind::InvalidAlgorithmName
        | JwtErrorKind::MissingAlgorithm => (
            ErrorKind::BadSignature,
            "Token signing algorithm not accepted",
        ),
        _ => (ErrorKind::MalformedToken, "Invalid token format"),
    };
    AppError::with_source(kind, format!("{message}: {err}"), err)
}
