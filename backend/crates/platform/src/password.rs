//! Password Hashing and Verification
//!
//! Argon2id hashing with an optional application-wide pepper. Clear text
//! is NFKC-normalized, checked against a small policy and wiped from memory
//! on drop.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "abcdefgh",
    "letmein1",
    "welcome1",
    "admin123",
    "iloveyou",
    "sunshine",
    "football",
    "baseball",
    "trustno1",
    "qwertyui",
    "qwerty123",
    "asdfghjk",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Password cannot be blank")]
    Blank,

    #[error("Password contains control characters")]
    ControlCharacter,

    #[error("Password is too easy to guess")]
    TooWeak,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Clear text password, zeroized on drop. Deliberately not `Clone`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize and validate a password chosen at signup.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::normalized(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Normalize a password presented at login.
    ///
    /// The policy is not applied: a password that no longer meets it must
    /// still be able to authenticate, and rejecting it early would leak
    /// which inputs are worth trying.
    pub fn for_verification(raw: String) -> Self {
        Self::normalized(raw)
    }

    fn normalized(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        if self.0.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let length = self.0.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }

        if self.0.chars().any(|c| c.is_control() && c != '\t') {
            return Err(PasswordPolicyError::ControlCharacter);
        }

        if is_weak(&self.0) {
            return Err(PasswordPolicyError::TooWeak);
        }

        Ok(())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }

    /// Hash with Argon2id (default parameters) and a fresh random salt.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
            .to_string();
        Ok(HashedPassword { phc })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// Argon2id hash in PHC string format, safe to persist.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    phc: String,
}

impl HashedPassword {
    /// Rehydrate from storage. Rejects anything that is not a PHC string.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { phc })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.phc
    }

    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

fn is_weak(password: &str) -> bool {
    let lower = password.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    if let Some(&first) = chars.first()
        && chars.iter().all(|&c| c == first)
    {
        return true;
    }

    // runs like 12345678 or 87654321
    let digits: Vec<u32> = chars.iter().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() == chars.len() {
        let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
        let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
        if ascending || descending {
            return true;
        }
    }

    WEAK_PASSWORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejections() {
        assert_eq!(
            ClearTextPassword::new("short".into()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 8 }
        );
        assert_eq!(
            ClearTextPassword::new("x".repeat(MAX_PASSWORD_LENGTH + 1)).unwrap_err(),
            PasswordPolicyError::TooLong { max: 128 }
        );
        assert_eq!(
            ClearTextPassword::new("          ".into()).unwrap_err(),
            PasswordPolicyError::Blank
        );
        assert_eq!(
            ClearTextPassword::new("abc\u{0007}defgh".into()).unwrap_err(),
            PasswordPolicyError::ControlCharacter
        );
    }

    #[test]
    fn test_weak_passwords() {
        for weak in ["password123", "aaaaaaaaa", "12345678", "98765432", "Sunshine"] {
            assert_eq!(
                ClearTextPassword::new(weak.into()).unwrap_err(),
                PasswordPolicyError::TooWeak,
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_reasonable_passwords() {
        assert!(ClearTextPassword::new("correct horse battery".into()).is_ok());
        assert!(ClearTextPassword::new("パスワード安全です!".into()).is_ok());
    }

    #[test]
    fn test_hash_and_verify_with_pepper() {
        let password = ClearTextPassword::new("Reward$2024ledger".into()).unwrap();
        let hashed = password.hash(Some(b"pepper")).unwrap();

        assert!(hashed.verify(&password, Some(b"pepper")));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&ClearTextPassword::for_verification("other".into()), Some(b"pepper")));

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, Some(b"pepper")));
    }

    #[test]
    fn test_login_normalization_matches_signup() {
        // full-width digits normalize to ASCII under NFKC
        let signup = ClearTextPassword::new("ledger-１２３４".into()).unwrap();
        let hashed = signup.hash(None).unwrap();
        let login = ClearTextPassword::for_verification("ledger-1234".into());
        assert!(hashed.verify(&login, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret-value".into());
        let output = format!("{:?}", password);
        assert!(output.contains("REDACTED"));
        assert!(!output.contains("secret"));
    }
}
