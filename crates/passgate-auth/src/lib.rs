//! # passgate-auth
//!
//! The credential-and-token lifecycle for Passgate.
//!
//! ## Modules
//!
//! - `store`: `CredentialStore` trait and the in-memory backend
//! - `password`: Argon2id password hashing and registration input policy
//! - `jwt`: HS256 token issuance and verification
//! - `service`: `AuthService` (register, login, request gating) and `RequestContext`

pub mod jwt;
pub mod password;
pub mod service;
pub mod store;

pub use jwt::{Claims, IssuedToken, TokenIssuer, TokenVerifier};
pub use password::{CredentialValidator, PasswordHasher};
pub use service::{AuthService, AuthState, LoginResult, RegistrationReceipt, RequestContext};
pub use store::{CredentialStore, MemoryCredentialStore};
