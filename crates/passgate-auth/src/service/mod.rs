//! Auth orchestration and per-request context.

pub mod auth;
pub mod context;

pub use auth::{AuthService, LoginResult, RegistrationReceipt, extract_bearer};
pub use context::{AuthState, RequestContext};
