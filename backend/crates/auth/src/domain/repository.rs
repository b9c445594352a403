//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, referral_code::ReferralCode, user_id::UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A duplicate email yields `AuthError::EmailTaken`,
    /// a duplicate referral code `AuthError::ReferralCodeTaken`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_referral_code(&self, code: &ReferralCode) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Pays the referral bonus when someone signs up with a referrer's code.
///
/// Auth only knows *who* to reward; the amount and the ledger entry belong
/// to whoever implements this (the wallet crate).
#[trait_variant::make(ReferralRewarder: Send)]
pub trait LocalReferralRewarder {
    async fn reward_referrer(&self, referrer_id: &UserId, referred_full_name: &str)
    -> AuthResult<()>;
}
