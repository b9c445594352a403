//! Access tokens
//!
//! `base64url(claims json) "." base64url(HMAC-SHA256(secret, first segment))`
//!
//! Stateless: nothing is stored server side, so a token stays valid until
//! it expires. Verification fails closed.

use chrono::{DateTime, Utc};
use platform::crypto::{from_base64url, hmac_sha256, hmac_sha256_verify, to_base64url};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: String,
    pub email: String,
    /// Expiry, unix seconds
    pub exp: i64,
}

impl AccessClaims {
    pub fn user_id(&self) -> AuthResult<UserId> {
        UserId::parse_str(&self.sub).map_err(|_| AuthError::TokenInvalid)
    }
}

pub struct TokenService<'a> {
    config: &'a AuthConfig,
}

impl<'a> TokenService<'a> {
    pub fn new(config: &'a AuthConfig) -> Self {
        Self { config }
    }

    pub fn issue(&self, user_id: &UserId, email: &Email, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.as_str().to_string(),
            exp: now.timestamp() + self.config.token_ttl_secs(),
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))?;

        let body = to_base64url(&payload);
        let signature = hmac_sha256(&self.config.token_secret, body.as_bytes());
        Ok(format!("{}.{}", body, to_base64url(&signature)))
    }

    pub fn verify(&self, token: &str) -> AuthResult<AccessClaims> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<AccessClaims> {
        let (body, signature) = token.split_once('.').ok_or(AuthError::TokenInvalid)?;
        let signature = from_base64url(signature).map_err(|_| AuthError::TokenInvalid)?;

        if !hmac_sha256_verify(&self.config.token_secret, body.as_bytes(), &signature) {
            return Err(AuthError::TokenInvalid);
        }

        let payload = from_base64url(body).map_err(|_| AuthError::TokenInvalid)?;
        let claims: AccessClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn config() -> AuthConfig {
        AuthConfig {
            token_secret: [7u8; 32],
            ..AuthConfig::default()
        }
    }

    fn issue_for(config: &AuthConfig, now: DateTime<Utc>) -> (UserId, String) {
        let user_id = UserId::new();
        let email = Email::new("user@example.com").unwrap();
        let token = TokenService::new(config).issue(&user_id, &email, now).unwrap();
        (user_id, token)
    }

    #[test]
    fn test_issue_and_verify() {
        let config = config();
        let now = Utc::now();
        let (user_id, token) = issue_for(&config, now);

        let claims = TokenService::new(&config).verify_at(&token, now).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.exp, now.timestamp() + 86_400);
    }

    #[test]
    fn test_expired_token() {
        let config = config();
        let now = Utc::now();
        let (_, token) = issue_for(&config, now);

        let later = now + Duration::hours(24);
        assert!(matches!(
            TokenService::new(&config).verify_at(&token, later),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let now = Utc::now();
        let (_, token) = issue_for(&config(), now);

        let other = AuthConfig {
            token_secret: [8u8; 32],
            ..AuthConfig::default()
        };
        assert!(matches!(
            TokenService::new(&other).verify_at(&token, now),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_tampered_claims() {
        let config = config();
        let now = Utc::now();
        let (_, token) = issue_for(&config, now);
        let (_, signature) = token.split_once('.').unwrap();

        let forged = AccessClaims {
            sub: UserId::new().to_string(),
            email: "admin@example.com".into(),
            exp: now.timestamp() + 999_999,
        };
        let forged_body = to_base64url(&serde_json::to_vec(&forged).unwrap());
        let forged_token = format!("{}.{}", forged_body, signature);

        assert!(matches!(
            TokenService::new(&config).verify_at(&forged_token, now),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        let config = config();
        let service = TokenService::new(&config);
        for token in ["", "abc", "abc.def", "a.b.c", "!!!.???"] {
            assert!(
                matches!(service.verify(token), Err(AuthError::TokenInvalid)),
                "{token:?}"
            );
        }
    }
}
