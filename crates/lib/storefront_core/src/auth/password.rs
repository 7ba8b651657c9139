//! Password hashing via bcrypt.
//!
//! The digest embeds its own salt and cost factor, so verification needs
//! no external state. Neither plaintext nor digest is ever logged.

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let digest = hash_password("pw123456").unwrap();
        assert!(verify_password("pw123456", &digest).unwrap());
        assert!(!verify_password("wrong", &digest).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw123456").unwrap();
        let b = hash_password("pw123456").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_digest_is_an_error() {
        assert!(verify_password("pw123456", "not-a-bcrypt-hash").is_err());
    }
}
