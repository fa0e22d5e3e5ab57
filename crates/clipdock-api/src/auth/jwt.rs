//! HS256 bearer-token validation and issuance.
//!
//! Tokens carry the user id as `sub`. The API only validates tokens; minting
//! is exposed for tests and operational tooling.

use chrono::{Duration, Utc};
use clipdock_core::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub iat: i64,  // issued at timestamp
    pub exp: i64,  // expiration timestamp
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Mint a token for the given user.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate a bearer token and return the user id it was issued to.
    /// Signature and expiry failures are both 401s.
    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_tokens_verify_to_the_same_user() {
        let service = TokenService::new(SECRET, 24);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).expect("issue");
        assert_eq!(service.verify(&token).expect("verify"), user_id);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let service = TokenService::new(SECRET, -1);
        let token = service.issue(Uuid::new_v4()).expect("issue");

        let err = TokenService::new(SECRET, 24).verify(&token).unwrap_err();
        assert_eq!(
            clipdock_core::ErrorMetadata::http_status_code(&err),
            401
        );
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let service = TokenService::new(SECRET, 24);
        let token = service.issue(Uuid::new_v4()).expect("issue");

        let other = TokenService::new("ffffffffffffffffffffffffffffffff", 24);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let service = TokenService::new(SECRET, 24);
        assert!(service.verify("not-a-token").is_err());
        assert!(service.verify("").is_err());
    }
}
