//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;

/// Placeholder secret shipped in the default configuration.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION_CHANGE_ME_IN_PRODUCTION";

/// Minimum accepted length of the JWT secret in bytes (HS256 key size).
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Default token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Maximum username length in characters.
    #[serde(default = "default_username_max")]
    pub username_max_length: usize,
    /// Minimum password length in characters.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length in bytes.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Checks the configuration for values the auth core cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_BYTES} bytes"
            )));
        }
        if self.token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_seconds must be positive",
            ));
        }
        if self.username_max_length == 0 {
            return Err(AppError::configuration(
                "auth.username_max_length must be positive",
            ));
        }
        if self.password_min_length == 0 || self.password_min_length > self.password_max_length {
            return Err(AppError::configuration(format!(
                "auth.password_min_length ({}) must be between 1 and password_max_length ({})",
                self.password_min_length, self.password_max_length
            )));
        }
        if self.jwt_secret == PLACEHOLDER_JWT_SECRET {
            warn!("auth.jwt_secret is the shipped placeholder; set PASSGATE__AUTH__JWT_SECRET");
        }
        Ok(())
    }

    /// Default token lifetime as a `chrono::Duration`.
    pub fn token_ttl(&self) -> chrono::Duration {
        i64::try_from(self.token_ttl_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_seconds: default_token_ttl(),
            username_max_length: default_username_max(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("username_max_length", &self.username_max_length)
            .field("password_min_length", &self.password_min_length)
            .field("password_max_length", &self.password_max_length)
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .field("argon2_parallelism", &self.argon2_parallelism)
            .finish()
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_username_max() -> usize {
    64
}

fn default_password_min() -> usize {
    1
}

fn default_password_max() -> usize {
    1024
}

fn default_argon2_memory() -> u32 {
    19 * 1024
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
