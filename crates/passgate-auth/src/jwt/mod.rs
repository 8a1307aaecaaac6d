//! JWT token issuance, verification, claims, and secret generation.

pub mod claims;
pub mod issuer;
pub mod secret;
pub mod verifier;

pub use claims::Claims;
pub use issuer::{IssuedToken, TokenIssuer};
pub use secret::generate_secret;
pub use verifier::TokenVerifier;
