//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Policy failures become
//! `AuthError::PasswordValidation`; hashing failures are internal.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

/// Password as typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password chosen at signup, checked against the policy.
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))
    }

    /// Password presented at login. Never rejected here.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored credential (Argon2id, PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn from_phc_string(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".into()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_errors_are_client_errors() {
        let err = RawPassword::new("short".into()).unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Ledger-Entry-42".into()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&raw, None));
        assert!(!hashed.verify(&RawPassword::for_login("Ledger-Entry-43".into()), None));
    }

    #[test]
    fn test_login_password_skips_policy() {
        // a short password can still be presented; it just won't match
        let raw = RawPassword::for_login("abc".into());
        let stored = UserPassword::from_raw(&RawPassword::new("Ledger-Entry-42".into()).unwrap(), None)
            .unwrap();
        assert!(!stored.verify(&raw, None));
    }

    #[test]
    fn test_corrupt_hash_is_internal() {
        let err = UserPassword::from_phc_string("plaintext").unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
