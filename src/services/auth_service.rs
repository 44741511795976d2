//! Staff token service

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{constants::JWT_LEEWAY_SECONDS, error::AppResult};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub is_staff: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Token service for admin access
pub struct AuthService;

impl AuthService {
    /// Sign a token for `username`, valid for `ttl`
    pub fn issue_token(username: &str, is_staff: bool, secret: &str, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            is_staff,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a token and return its claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        validation.leeway = JWT_LEEWAY_SECONDS;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_token_round_trip() {
        let token = AuthService::issue_token("admin", true, "secret", Duration::hours(1)).unwrap();
        let claims = assert_ok!(AuthService::verify_token(&token, "secret"));
        assert_eq!(claims.sub, "admin");
        assert!(claims.is_staff);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = AuthService::issue_token("admin", true, "secret", Duration::hours(1)).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, "other"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let token = AuthService::issue_token("admin", true, "secret", Duration::hours(-2)).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, "secret"),
            Err(AppError::TokenExpired)
        ));
    }
}
