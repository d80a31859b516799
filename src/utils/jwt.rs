use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    error::{AppError, Result},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Issues and verifies signed session tokens. The signing secret is injected
/// at construction and read-only afterwards; expiry is the only way a token
/// stops being valid, there is no server-side revocation.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::ConfigError("JWT_SECRET not set".to_string()));
        }

        Ok(Self {
            secret: config.jwt_secret.clone(),
            ttl: Duration::seconds(config.token_ttl_secs),
        })
    }

    pub fn issue(&self, user_id: i32) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        // exact expiry boundaries, no grace window
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired".to_string()),
            ErrorKind::InvalidSignature => {
                AppError::Unauthorized("Invalid token signature".to_string())
            }
            _ => AppError::Unauthorized("Malformed token".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, ttl_secs: i64) -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_secs: ttl_secs,
        })
        .unwrap()
    }

    #[test]
    fn issued_token_verifies_within_ttl() {
        let tokens = service("fixture-secret", 3600);

        let token = tokens.issue(42).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, "42");
    }

    #[test]
    fn token_fails_once_ttl_has_elapsed() {
        // A negative TTL stamps an already-elapsed expiry.
        let tokens = service("fixture-secret", -30);

        let token = tokens.issue(42).unwrap();
        let err = tokens.verify(&token).unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Token expired"));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = service("secret-a", 3600);
        let verifier = service("secret-b", 3600);

        let token = issuer.issue(42).unwrap();
        let err = verifier.verify(&token).unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Invalid token signature"));
    }

    #[test]
    fn garbage_input_is_malformed() {
        let tokens = service("fixture-secret", 3600);

        let err = tokens.verify("not-a-jwt").unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "Malformed token"));
    }

    #[test]
    fn empty_secret_is_a_config_error() {
        let result = TokenService::new(&AuthConfig {
            jwt_secret: String::new(),
            token_ttl_secs: 3600,
        });

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
