//! Domain Entities
//!
//! Ledger rows, ad-watch events and withdrawal requests.

use chrono::{DateTime, Utc};
use kernel::id::{AdWatchId, TransactionId, UserId, WithdrawalId};
use kernel::money::Money;

use crate::domain::value_objects::{
    AdType, PaymentId, PaymentMethod, TransactionKind, WithdrawalStatus,
};

/// Append-only ledger entry. `amount` is signed: credits positive,
/// withdrawal reservations negative.
#[derive(Debug, Clone)]
pub struct WalletTransaction {
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl WalletTransaction {
    fn new(user_id: UserId, kind: TransactionKind, amount: Money, description: String) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            user_id,
            kind,
            amount,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn ad_reward(user_id: UserId, reward: Money, ad_type: &AdType) -> Self {
        Self::new(
            user_id,
            TransactionKind::AdReward,
            reward,
            format!("Watched {} ad", ad_type.as_str()),
        )
    }

    pub fn referral_bonus(user_id: UserId, bonus: Money, referred_full_name: &str) -> Self {
        Self::new(
            user_id,
            TransactionKind::ReferralBonus,
            bonus,
            format!("Referral bonus for {}", referred_full_name),
        )
    }

    pub fn withdrawal(user_id: UserId, amount: Money, method: PaymentMethod) -> Self {
        Self::new(
            user_id,
            TransactionKind::Withdrawal,
            -amount,
            format!("Withdrawal request via {}", method.as_str()),
        )
    }

    pub fn withdrawal_refund(user_id: UserId, amount: Money, withdrawal_id: &WithdrawalId) -> Self {
        Self::new(
            user_id,
            TransactionKind::WithdrawalRefund,
            amount,
            format!("Refund for rejected withdrawal {}", withdrawal_id),
        )
    }
}

#[derive(Debug, Clone)]
pub struct AdWatch {
    pub ad_watch_id: AdWatchId,
    pub user_id: UserId,
    pub ad_type: AdType,
    pub reward: Money,
    pub watched_at: DateTime<Utc>,
}

impl AdWatch {
    pub fn new(user_id: UserId, ad_type: AdType, reward: Money) -> Self {
        Self {
            ad_watch_id: AdWatchId::new(),
            user_id,
            ad_type,
            reward,
            watched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WithdrawalRequest {
    pub withdrawal_id: WithdrawalId,
    pub user_id: UserId,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_id: PaymentId,
    pub status: WithdrawalStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
}

impl WithdrawalRequest {
    pub fn pending(
        user_id: UserId,
        amount: Money,
        payment_method: PaymentMethod,
        payment_id: PaymentId,
    ) -> Self {
        Self {
            withdrawal_id: WithdrawalId::new(),
            user_id,
            amount,
            payment_method,
            payment_id,
            status: WithdrawalStatus::Pending,
            requested_at: Utc::now(),
            processed_at: None,
            admin_notes: None,
        }
    }
}

/// Withdrawal joined with its owner for the admin list.
/// Owner fields are `None` when the user row is gone.
#[derive(Debug, Clone)]
pub struct WithdrawalWithOwner {
    pub request: WithdrawalRequest,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

/// Balance counters as returned by an atomic ledger update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub balance: Money,
    pub total_earned: Money,
    pub ads_watched: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_withdrawals: i64,
    pub pending_withdrawals: i64,
    pub total_ads_watched: i64,
}
