//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use crate::domain::value_object::email::Email;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for access tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Lowercased emails that are granted admin at signup
    pub admin_emails: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600),
            password_pepper: None,
            admin_emails: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Config with a random token secret (tokens die with the process)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    pub fn with_admin_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.admin_emails = emails
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn is_admin_email(&self, email: &Email) -> bool {
        self.admin_emails.iter().any(|e| e == email.as_str())
    }

    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }
}
