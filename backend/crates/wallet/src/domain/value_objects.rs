//! Domain Value Objects
//!
//! Immutable value types for the wallet domain.

use serde::Serialize;

use crate::error::{WalletError, WalletResult};

/// Kind of balance change recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    AdReward,
    ReferralBonus,
    /// Funds reserved by a withdrawal request (negative amount)
    Withdrawal,
    /// Reserved funds returned after a rejection
    WithdrawalRefund,
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::AdReward => "ad_reward",
            TransactionKind::ReferralBonus => "referral_bonus",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::WithdrawalRefund => "withdrawal_refund",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ad_reward" => Some(TransactionKind::AdReward),
            "referral_bonus" => Some(TransactionKind::ReferralBonus),
            "withdrawal" => Some(TransactionKind::Withdrawal),
            "withdrawal_refund" => Some(TransactionKind::WithdrawalRefund),
            _ => None,
        }
    }
}

/// Withdrawal state machine: `pending` -> `approved` | `rejected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Approved => "approved",
            WithdrawalStatus::Rejected => "rejected",
        }
    }

    /// Exact lowercase names only
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(WithdrawalStatus::Pending),
            "approved" => Some(WithdrawalStatus::Approved),
            "rejected" => Some(WithdrawalStatus::Rejected),
            _ => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, WithdrawalStatus::Pending)
    }
}

/// Payout rail. Stored as an identifier only; never called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Esewa,
    Khalti,
}

impl PaymentMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Esewa => "esewa",
            PaymentMethod::Khalti => "khalti",
        }
    }

    /// Exact lowercase names only
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "esewa" => Some(PaymentMethod::Esewa),
            "khalti" => Some(PaymentMethod::Khalti),
            _ => None,
        }
    }
}

fn bounded_text(field: &str, raw: &str, max: usize) -> WalletResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(WalletError::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max {
        return Err(WalletError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    if value.chars().any(char::is_control) {
        return Err(WalletError::Validation(format!(
            "{} contains invalid characters",
            field
        )));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdType(String);

impl AdType {
    pub const MAX_LENGTH: usize = 32;
    pub const DEFAULT: &'static str = "video";

    pub fn new(raw: &str) -> WalletResult<Self> {
        bounded_text("Ad type", raw, Self::MAX_LENGTH).map(Self)
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AdType {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Account identifier on the payout rail (phone number, wallet id, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentId(String);

impl PaymentId {
    pub const MAX_LENGTH: usize = 64;

    pub fn new(raw: &str) -> WalletResult<Self> {
        bounded_text("Payment id", raw, Self::MAX_LENGTH).map(Self)
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_terminal() {
        assert_eq!(WithdrawalStatus::parse("approved"), Some(WithdrawalStatus::Approved));
        assert_eq!(WithdrawalStatus::parse("rejected"), Some(WithdrawalStatus::Rejected));
        assert_eq!(WithdrawalStatus::parse("Approved"), None);
        assert_eq!(WithdrawalStatus::parse("paid"), None);
        assert!(!WithdrawalStatus::Pending.is_terminal());
        assert!(WithdrawalStatus::Approved.is_terminal());
        assert!(WithdrawalStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_kind_strings_round_trip() {
        for kind in [
            TransactionKind::AdReward,
            TransactionKind::ReferralBonus,
            TransactionKind::Withdrawal,
            TransactionKind::WithdrawalRefund,
        ] {
            assert_eq!(TransactionKind::parse(kind.as_str()), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_payment_method() {
        assert_eq!(PaymentMethod::parse("esewa"), Some(PaymentMethod::Esewa));
        assert_eq!(PaymentMethod::parse("khalti"), Some(PaymentMethod::Khalti));
        assert_eq!(PaymentMethod::parse("eSewa"), None);
        assert_eq!(PaymentMethod::parse("Khalti"), None);
        assert_eq!(PaymentMethod::parse("paypal"), None);
    }

    #[test]
    fn test_ad_type_bounds() {
        assert_eq!(AdType::new(" banner ").unwrap().as_str(), "banner");
        assert_eq!(AdType::default().as_str(), "video");
        assert!(AdType::new("").is_err());
        assert!(AdType::new(&"x".repeat(AdType::MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_payment_id_bounds() {
        assert_eq!(PaymentId::new(" 9800000000 ").unwrap().as_str(), "9800000000");
        assert!(PaymentId::new("   ").is_err());
        assert!(PaymentId::new(&"9".repeat(PaymentId::MAX_LENGTH + 1)).is_err());
        assert!(PaymentId::new("98\t00").is_err());
    }
}
