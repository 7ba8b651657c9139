//! JWT token issuance and verification.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::info;
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::{TokenClaims, TokenType};

/// Sign a new token for the given user (HS256).
///
/// Every call mints a fresh random `jti`, so two tokens issued to the same
/// user are independently revocable. Tokens are integrity-protected only,
/// not encrypted; nothing beyond the subject id and jti goes into the claims.
pub fn issue_token(
    user_id: i64,
    token_type: TokenType,
    ttl_secs: i64,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        token_type,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify a token's signature and expiry, returning the claims on success.
///
/// Zero leeway: a token issued with TTL 0 is already expired. Revocation is
/// checked by the caller after decode, so the order stays
/// signature → expiry → blacklist.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;
    match decode::<TokenClaims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(AuthError::TokenExpired),
        Err(_) => Err(AuthError::TokenInvalid),
    }
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    // Generate and persist
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storefront")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn issue_then_verify_round_trip() {
        let token = issue_token(42, TokenType::Access, 3600, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.user_id(), Some(42));
    }

    #[test]
    fn zero_ttl_token_is_expired() {
        let token = issue_token(1, TokenType::Access, 0, SECRET).unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn wrong_secret_is_invalid_not_expired() {
        let token = issue_token(1, TokenType::Access, 3600, SECRET).unwrap();
        assert!(matches!(
            verify_token(&token, b"other-secret"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert!(matches!(
            verify_token("not.a.jwt", SECRET),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn each_issue_mints_a_fresh_jti() {
        let a = issue_token(7, TokenType::Access, 3600, SECRET).unwrap();
        let b = issue_token(7, TokenType::Access, 3600, SECRET).unwrap();
        let ja = verify_token(&a, SECRET).unwrap().jti;
        let jb = verify_token(&b, SECRET).unwrap().jti;
        assert_ne!(ja, jb);
    }

    #[test]
    fn refresh_tokens_carry_their_type() {
        let token = issue_token(9, TokenType::Refresh, 86400, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
    }
}
