use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::dtos::Claims;
use crate::{AppError, AppResult};

/// Mint an HS256 access token for `user_id`, valid for `ttl_seconds`.
pub fn issue_access_token(secret: &str, user_id: Uuid, ttl_seconds: i64) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Resolve a bearer token to its claims. Expired or tampered tokens fail.
pub fn verify_access_token(secret: &str, token: &str) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issued_token_resolves_to_user() {
        let user_id = Uuid::new_v4();
        let token = issue_access_token(SECRET, user_id, 60).unwrap();

        let claims = verify_access_token(SECRET, &token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_access_token(SECRET, Uuid::new_v4(), 60).unwrap();
        let err = verify_access_token("other-secret", &token).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Beyond the default 60s leeway.
        let token = issue_access_token(SECRET, Uuid::new_v4(), -3600).unwrap();
        assert!(verify_access_token(SECRET, &token).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_unauthenticated() {
        let claims = Claims { sub: "anonymous".to_string(), exp: 0, iat: 0 };
        assert_eq!(claims.user_id().unwrap_err().error_code(), "AUTHENTICATION_FAILED");
    }
}
