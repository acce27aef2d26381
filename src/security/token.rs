/// Access token issuing and validation (HS256)
///
/// The secret comes from configuration; no ambient key state. Handlers get
/// the acting user by decoding the Bearer token, never from a global session.
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims: subject is the user id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issue a signed access token for a user.
pub fn issue_token(user_id: Uuid, secret: &str, ttl_hours: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
}

/// Decode and validate a token, returning the user id it was issued for.
///
/// Expired or otherwise invalid tokens are `Unauthenticated`, the same as a
/// missing token: guarded operations cannot distinguish the two cases.
pub fn decode_token(token: &str, secret: &str) -> Result<Uuid> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated)?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "secret", 1).unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_is_unauthenticated() {
        let token = issue_token(Uuid::new_v4(), "secret", 1).unwrap();
        assert!(matches!(
            decode_token(&token, "other"),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let token = issue_token(Uuid::new_v4(), "secret", -2).unwrap();
        assert!(matches!(
            decode_token(&token, "secret"),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_garbage_token_is_unauthenticated() {
        assert!(matches!(
            decode_token("not-a-token", "secret"),
            Err(AppError::Unauthenticated)
        ));
    }
}
