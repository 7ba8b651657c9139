//! Authentication domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token kind carried in the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential authorizing API calls.
    Access,
    /// Longer-lived credential used only to mint new access tokens.
    Refresh,
}

/// JWT claims embedded in issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim, stringified).
    pub sub: String,
    /// Unique token identifier; the revocation key.
    pub jti: String,
    /// Token kind: `access` or `refresh`.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// Parse the `sub` claim back into a numeric user ID.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Public user profile. Field list is the wire schema — exhaustive by design.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenType::Access).unwrap(),
            "\"access\""
        );
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            "\"refresh\""
        );
    }

    #[test]
    fn claims_use_the_type_key_on_the_wire() {
        let claims = TokenClaims {
            sub: "1".into(),
            jti: "j".into(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "access");
        assert_eq!(json["sub"], "1");
    }

    #[test]
    fn non_numeric_sub_yields_no_user_id() {
        let claims = TokenClaims {
            sub: "abc".into(),
            jti: "j".into(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 1,
        };
        assert_eq!(claims.user_id(), None);
    }
}
