//! Registration, login, and request gating.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use passgate_core::config::AuthConfig;
use passgate_core::error::{AppError, ErrorKind};
use passgate_core::result::AppResult;
use passgate_entity::Identity;

use crate::jwt::{TokenIssuer, TokenVerifier};
use crate::password::{CredentialValidator, PasswordHasher};
use crate::store::CredentialStore;

use super::context::RequestContext;

/// Authorization scheme prefix accepted by the request gate.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Confirmation of a successful registration. No token is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    /// The registered username.
    pub username: String,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Signed bearer token.
    pub token: String,
    /// Token expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Orchestrates the credential store, hasher, and token issuer/verifier.
#[derive(Clone)]
pub struct AuthService {
    /// Identity persistence.
    store: Arc<dyn CredentialStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Registration input policy.
    validator: CredentialValidator,
    /// Token issuer.
    issuer: Arc<TokenIssuer>,
    /// Token verifier.
    verifier: Arc<TokenVerifier>,
    /// Digest verified against when the username is unknown, so that
    /// unknown users and wrong passwords take the same time.
    dummy_hash: Arc<str>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("validator", &self.validator)
            .field("issuer", &self.issuer)
            .field("verifier", &self.verifier)
            .finish()
    }
}

impl AuthService {
    /// Builds the service and its components from configuration.
    ///
    /// The secret and default lifetime are copied out of `config` here and
    /// stay fixed for the lifetime of the service.
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> AppResult<Self> {
        let hasher = PasswordHasher::new(config)?;
        let dummy_hash = hasher.hash_password("passgate-timing-equalisation")?;

        Ok(Self {
            store,
            hasher: Arc::new(hasher),
            validator: CredentialValidator::new(config),
            issuer: Arc::new(TokenIssuer::new(config)),
            verifier: Arc::new(TokenVerifier::new(config)),
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Returns the token issuer.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Returns the token verifier.
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Registers a new identity.
    ///
    /// Fails with `InvalidInput` for empty or out-of-policy credentials and
    /// with `DuplicateIdentity` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<RegistrationReceipt> {
        self.validator.validate(username, password)?;

        let password_hash = self.hasher.hash_password(password)?;
        let identity = Identity::new(username, password_hash);
        let created_at = identity.created_at;

        self.store.insert(identity).await.inspect_err(|e| {
            if e.kind == ErrorKind::DuplicateIdentity {
                warn!(username = %username, "Registration refused: username taken");
            }
        })?;

        info!(username = %username, "Identity registered");

        Ok(RegistrationReceipt {
            username: username.to_string(),
            created_at,
        })
    }

    /// Checks credentials and issues a token with the default lifetime.
    ///
    /// Every failure is `InvalidCredentials`, including a password longer
    /// than registration accepts. Oversized passwords are refused before
    /// the store lookup and before any hashing.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        if !self.validator.password_within_limit(password) {
            warn!(username = %username, "Login failed: password exceeds length limit");
            return Err(AppError::invalid_credentials());
        }

        let identity = match self.store.find(username).await {
            Ok(identity) => Some(identity),
            Err(e) if e.kind == ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        let Some(identity) = identity else {
            let _ = self.hasher.verify_password(password, &self.dummy_hash);
            warn!(username = %username, "Login failed: unknown username");
            return Err(AppError::invalid_credentials());
        };

        if !self
            .hasher
            .verify_password(password, identity.password_hash())
        {
            warn!(username = %username, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        let issued = self.issuer.issue_default(identity.username())?;

        info!(
            username = %username,
            expires_at = %issued.expires_at,
            "Login successful"
        );

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    /// Gates a request on its `Authorization` header value.
    ///
    /// On success the verified subject is attached to `ctx`. A missing
    /// header or non-Bearer scheme fails with `MissingToken`; a rejected
    /// token fails with `Unauthorized`, whose source and
    /// [`AppError::cause_kind`] keep the specific reason.
    pub fn authenticate_request(
        &self,
        ctx: &mut RequestContext,
        authorization: Option<&str>,
    ) -> AppResult<()> {
        ctx.begin_check();

        let token = match extract_bearer(authorization) {
            Ok(token) => token,
            Err(e) => {
                ctx.reject(e.kind);
                return Err(e);
            }
        };

        match self.verifier.verify(token) {
            Ok(subject) => {
                ctx.authenticate(subject);
                Ok(())
            }
            Err(cause) => {
                warn!(reason = %cause.kind, "Rejected bearer token");
                ctx.reject(cause.kind);
                if cause.kind.is_token_failure() {
                    Err(AppError::unauthorized_from(cause))
                } else {
                    Err(cause)
                }
            }
        }
    }

    /// Convenience wrapper returning a fresh context for `authorization`.
    pub fn authenticate(&self, authorization: Option<&str>) -> AppResult<RequestContext> {
        let mut ctx = RequestContext::new();
        self.authenticate_request(&mut ctx, authorization)?;
        Ok(ctx)
    }
}

/// Extracts the token from a `Bearer <token>` header value.
pub fn extract_bearer(authorization: Option<&str>) -> AppResult<&str> {
    let header =
        authorization.ok_or_else(|| AppError::missing_token("Missing Authorization header"))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::missing_token("Invalid Authorization header format"))?
        .trim();

    if token.is_empty() {
        return Err(AppError::missing_token("Bearer token is empty"));
    }

    Ok(token)
}
