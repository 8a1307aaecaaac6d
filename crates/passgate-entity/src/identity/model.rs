//! Identity entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered identity: a unique username bound to a password digest.
///
/// Identities are immutable once created. Username comparison is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC digest of the password.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the identity was registered.
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Creates a new identity stamped with the current time.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the stored password digest.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
