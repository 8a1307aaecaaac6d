//! Random signing secret generation.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use passgate_core::config::auth::MIN_JWT_SECRET_BYTES;
use passgate_core::error::AppError;

/// Generates `bytes` random bytes from the OS and encodes them as
/// unpadded URL-safe base64, suitable for `auth.jwt_secret`.
pub fn generate_secret(bytes: usize) -> Result<String, AppError> {
    if bytes < MIN_JWT_SECRET_BYTES {
        return Err(AppError::invalid_input(format!(
            "Secret must be at least {MIN_JWT_SECRET_BYTES} bytes"
        )));
    }

    let mut buf = vec![0u8; bytes];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| AppError::internal(format!("OS random source failed: {e}")))?;

    Ok(URL_SAFE_NO_PAD.encode(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secrets_are_unique() {
        let a = generate_secret(48).unwrap();
        let b = generate_secret(48).unwrap();
        assert_ne!(a, b);
        assert_eq!(URL_SAFE_NO_PAD.decode(&a).unwrap().len(), 48);
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(generate_secret(16).is_err());
    }
}
