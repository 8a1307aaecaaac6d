//! Unified application error types for Passgate.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A username or password failed input validation.
    InvalidInput,
    /// The username is already registered.
    DuplicateIdentity,
    /// The requested identity does not exist.
    NotFound,
    /// Login failed. Covers both unknown usernames and wrong passwords.
    InvalidCredentials,
    /// A token lifetime was zero, negative, or below one second.
    InvalidTtl,
    /// No bearer token was presented.
    MissingToken,
    /// The token is not a well-formed three-segment JWT.
    MalformedToken,
    /// The token signature does not match the process secret.
    BadSignature,
    /// The token's expiry has been reached.
    Expired,
    /// Umbrella for any token verification failure at the request gate.
    Unauthorized,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status the boundary layer should answer with.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidInput
            | Self::DuplicateIdentity
            | Self::InvalidCredentials
            | Self::InvalidTtl => StatusCode::BAD_REQUEST,
            Self::MissingToken
            | Self::MalformedToken
            | Self::BadSignature
            | Self::Expired
            | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Configuration | Self::Serialization | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this kind is produced by token verification.
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedToken | Self::BadSignature | Self::Expired
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "INVALID_INPUT"),
            Self::DuplicateIdentity => write!(f, "DUPLICATE_IDENTITY"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::InvalidTtl => write!(f, "INVALID_TTL"),
            Self::MissingToken => write!(f, "MISSING_TOKEN"),
            Self::MalformedToken => write!(f, "MALFORMED_TOKEN"),
            Self::BadSignature => write!(f, "BAD_SIGNATURE"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Passgate.
///
/// Token verification failures reach callers of the request gate as
/// [`ErrorKind::Unauthorized`], with the specific verifier error kept as the
/// `source` so diagnostics can still tell an expired token from a forged one.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Create a duplicate-identity error.
    pub fn duplicate_identity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateIdentity, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid username or password")
    }

    /// Create an invalid-TTL error.
    pub fn invalid_ttl(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTtl, message)
    }

    /// Create a missing-token error.
    pub fn missing_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingToken, message)
    }

    /// Create a malformed-token error.
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedToken, message)
    }

    /// Create a bad-signature error.
    pub fn bad_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadSignature, message)
    }

    /// Create an expired-token error.
    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Expired, message)
    }

    /// Wrap a verifier failure into the single user-facing `Unauthorized`
    /// category, keeping the verifier error as the source.
    pub fn unauthorized_from(cause: AppError) -> Self {
        Self::with_source(ErrorKind::Unauthorized, "Unauthorized", cause)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Returns the most specific [`ErrorKind`] found along the source chain.
    ///
    /// For an `Unauthorized` error produced by [`AppError::unauthorized_from`]
    /// this is the verifier's kind (`Expired`, `BadSignature`, ...).
    pub fn cause_kind(&self) -> ErrorKind {
        let mut kind = self.kind;
        let mut current: Option<&(dyn std::error::Error + 'static)> = self
            .source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static));
        while let Some(err) = current {
            if let Some(app) = err.downcast_ref::<AppError>() {
                kind = app.kind;
            }
            current = err.source();
        }
        kind
    }

    /// Returns the HTTP status for this error.
    pub fn http_status(&self) -> StatusCode {
        self.kind.http_status()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        let source = self
            .source
            .as_deref()
            .and_then(|e| e.downcast_ref::<AppError>())
            .map(|inner| Box::new(inner.clone()) as Box<dyn std::error::Error + Send + Sync>);

        Self {
            kind: self.kind,
            message: self.message.clone(),
            source,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
