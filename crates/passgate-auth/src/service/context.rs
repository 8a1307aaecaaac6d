//! Request context carrying the authentication state of one request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use passgate_core::error::ErrorKind;

/// Where a request is in the authentication flow.
///
/// `Unauthenticated → PendingCredentialCheck → Authenticated | Rejected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    /// No credentials have been examined yet.
    Unauthenticated,
    /// Credentials were presented and are being checked.
    PendingCredentialCheck,
    /// The credentials were accepted.
    Authenticated {
        /// Username recovered from the token.
        subject: String,
    },
    /// The credentials were refused.
    Rejected {
        /// The specific reason, kept for diagnostics only.
        reason: ErrorKind,
    },
}

/// Context for the current request.
///
/// Created unauthenticated by the boundary layer and handed to
/// [`AuthService::authenticate_request`](crate::service::AuthService::authenticate_request),
/// which attaches the verified subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Authentication state.
    state: AuthState,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new, unauthenticated request context.
    pub fn new() -> Self {
        Self {
            state: AuthState::Unauthenticated,
            request_time: Utc::now(),
        }
    }

    /// Returns the current authentication state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Returns the authenticated username, if any.
    pub fn subject(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { subject } => Some(subject),
            _ => None,
        }
    }

    /// Returns whether the request carries a verified identity.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    /// Returns the rejection reason, if the request was refused.
    pub fn rejection_reason(&self) -> Option<ErrorKind> {
        match self.state {
            AuthState::Rejected { reason } => Some(reason),
            _ => None,
        }
    }

    pub(crate) fn begin_check(&mut self) {
        self.state = AuthState::PendingCredentialCheck;
    }

    pub(crate) fn authenticate(&mut self, subject: String) {
        self.state = AuthState::Authenticated { subject };
    }

    pub(crate) fn reject(&mut self, reason: ErrorKind) {
        self.state = AuthState::Rejected { reason };
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
