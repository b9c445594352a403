//! Referral Code Value Object
//!
//! Eight uppercase hex-alphabet characters taken from a fresh UUID v4.
//! Codes typed by users are normalized before lookup; anything that
//! cannot be a code is simply not one (no error).

use derive_more::Display;
use uuid::Uuid;

pub const REFERRAL_CODE_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct ReferralCode(String);

impl ReferralCode {
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self(simple[..REFERRAL_CODE_LENGTH].to_ascii_uppercase())
    }

    /// Normalize a client-supplied code. `None` for blank or malformed input.
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim().to_ascii_uppercase();
        let well_formed = code.len() == REFERRAL_CODE_LENGTH
            && code.chars().all(|c| c.is_ascii_alphanumeric());
        well_formed.then_some(Self(code))
    }

    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let code = ReferralCode::generate();
        assert_eq!(code.as_str().len(), REFERRAL_CODE_LENGTH);
        assert!(
            code.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_parse_normalizes() {
        let code = ReferralCode::parse("  ab12cd34 ").unwrap();
        assert_eq!(code.as_str(), "AB12CD34");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(ReferralCode::parse("").is_none());
        assert!(ReferralCode::parse("ABC").is_none());
        assert!(ReferralCode::parse("AB12CD345").is_none());
        assert!(ReferralCode::parse("AB12-D34").is_none());
    }
}
