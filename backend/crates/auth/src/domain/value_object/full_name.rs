//! Display name shown to admins next to withdrawal requests.

use derive_more::Display;

use crate::error::{AuthError, AuthResult};

pub const FULL_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct FullName(String);

impl FullName {
    pub fn new(name: impl AsRef<str>) -> AuthResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AuthError::Validation("Full name cannot be empty".into()));
        }
        if name.chars().count() > FULL_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Full name must be at most {} characters",
                FULL_NAME_MAX_LENGTH
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Full name contains invalid characters".into(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_accepts() {
        let name = FullName::new("  Sita Sharma ").unwrap();
        assert_eq!(name.as_str(), "Sita Sharma");
        assert_eq!(name.to_string(), "Sita Sharma");
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        assert!(FullName::new("ध".repeat(FULL_NAME_MAX_LENGTH)).is_ok());
        assert!(FullName::new("a".repeat(FULL_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_rejects_blank_and_control() {
        assert!(FullName::new("   ").is_err());
        assert!(FullName::new("Ram\nBahadur").is_err());
    }
}
