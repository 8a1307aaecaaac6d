//! Registration input policy for usernames and passwords.

use passgate_core::config::AuthConfig;
use passgate_core::error::AppError;

/// Validates credentials supplied at registration.
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    /// Maximum username length in characters.
    username_max_length: usize,
    /// Minimum password length in characters.
    password_min_length: usize,
    /// Maximum password length in bytes.
    password_max_length: usize,
}

impl CredentialValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            username_max_length: config.username_max_length,
            password_min_length: config.password_min_length.max(1),
            password_max_length: config.password_max_length,
        }
    }

    /// Validates a username.
    ///
    /// Usernames are stored verbatim, so surrounding whitespace is rejected
    /// rather than trimmed.
    pub fn validate_username(&self, username: &str) -> Result<(), AppError> {
        if username.is_empty() {
            return Err(AppError::invalid_input("Username must not be empty"));
        }

        if username.chars().count() > self.username_max_length {
            return Err(AppError::invalid_input(format!(
                "Username must be at most {} characters long",
                self.username_max_length
            )));
        }

        if username.trim() != username {
            return Err(AppError::invalid_input(
                "Username must not start or end with whitespace",
            ));
        }

        if username.chars().any(char::is_control) {
            return Err(AppError::invalid_input(
                "Username must not contain control characters",
            ));
        }

        Ok(())
    }

    /// Validates a password.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.is_empty() {
            return Err(AppError::invalid_input("Password must not be empty"));
        }

        if password.chars().count() < self.password_min_length {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters long",
                self.password_min_length
            )));
        }

        if password.len() > self.password_max_length {
            return Err(AppError::invalid_input(format!(
                "Password must be at most {} bytes long",
                self.password_max_length
            )));
        }

        Ok(())
    }

    /// Whether `password` fits under the byte limit that bounds hashing cost.
    pub fn password_within_limit(&self, password: &str) -> bool {
        password.len() <= self.password_max_length
    }

    /// Validates both halves of a registration request.
    pub fn validate(&self, username: &str, password: &str) -> Result<(), AppError> {
        self.validate_username(username)?;
        self.validate_password(password)
    }
}
