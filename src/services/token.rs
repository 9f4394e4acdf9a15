//! Stateless session tokens.
//!
//! Issues and verifies signed HS256 tokens carrying the caller's identity.
//! There is no server-side revocation: logout clears the client cookie and a
//! copied token stays valid until its natural expiry.

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_days: i64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, expiry_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_days,
        }
    }

    pub fn issue(&self, user_id: i32, email: &str, role: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.expiry_days * 24 * 60 * 60,
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign auth token")
    }

    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new("test-secret", 7);
        let token = service.issue(42, "admin@example.com", "admin").unwrap();

        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let service = TokenService::new("test-secret", -1);
        let token = service.issue(1, "a@b.c", "admin").unwrap();

        assert_eq!(service.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_rejected_as_invalid() {
        let issuer = TokenService::new("secret-a", 7);
        let verifier = TokenService::new("secret-b", 7);
        let token = issuer.issue(1, "a@b.c", "admin").unwrap();

        assert_eq!(verifier.decode(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_rejected_as_invalid() {
        let service = TokenService::new("test-secret", 7);
        assert_eq!(service.decode("not.a.token"), Err(TokenError::Invalid));
    }
}
