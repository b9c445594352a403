//! User Entity
//!
//! Identity plus the wallet counters. The counters are owned by the wallet
//! crate's ledger and only ever change through atomic storage updates; the
//! values held here are a snapshot taken when the row was read.

use chrono::{DateTime, Utc};
use kernel::money::Money;

use crate::domain::value_object::{
    email::Email, full_name::FullName, referral_code::ReferralCode, user_id::UserId,
    user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub password_hash: UserPassword,
    pub full_name: FullName,
    /// Never negative
    pub wallet_balance: Money,
    /// Never decreases
    pub total_earned: Money,
    pub ads_watched: i64,
    pub referral_code: ReferralCode,
    /// Set once at signup
    pub referred_by: Option<UserId>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Fresh account with an empty wallet and a newly generated referral code.
    pub fn new(
        email: Email,
        password_hash: UserPassword,
        full_name: FullName,
        referred_by: Option<UserId>,
        is_admin: bool,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            full_name,
            wallet_balance: Money::ZERO,
            total_earned: Money::ZERO,
            ads_watched: 0,
            referral_code: ReferralCode::generate(),
            referred_by,
            is_admin,
            created_at: Utc::now(),
        }
    }
}
