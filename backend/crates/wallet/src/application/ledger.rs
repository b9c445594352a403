//! Ledger Use Case
//!
//! The only code that changes a balance. Each operation is one atomic
//! storage update that also appends the matching ledger row.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::money::Money;

use crate::application::config::WalletConfig;
use crate::domain::entities::{AdWatch, WalletSnapshot, WalletTransaction, WithdrawalRequest};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::{AdType, PaymentMethod};
use crate::error::{WalletError, WalletResult};

#[derive(Debug)]
pub struct AdRewardOutput {
    pub reward: Money,
    pub snapshot: WalletSnapshot,
}

pub struct LedgerUseCase<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<WalletConfig>,
}

impl<R> LedgerUseCase<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<WalletConfig>) -> Self {
        Self { repo, config }
    }

    /// Flat reward per ad. Frequency is not limited.
    pub async fn credit_ad_reward(
        &self,
        user_id: &UserId,
        ad_type: AdType,
    ) -> WalletResult<AdRewardOutput> {
        let reward = self.config.ad_reward;
        let tx = WalletTransaction::ad_reward(*user_id, reward, &ad_type);
        let watch = AdWatch::new(*user_id, ad_type, reward);

        let snapshot = self
            .repo
            .credit_ad_reward(&tx, &watch)
            .await?
            .ok_or(WalletError::UserNotFound)?;

        tracing::info!(
            user_id = %user_id,
            reward = %reward,
            balance = %snapshot.balance,
            ads_watched = snapshot.ads_watched,
            "Ad reward credited"
        );

        Ok(AdRewardOutput { reward, snapshot })
    }

    pub async fn credit_referral_bonus(
        &self,
        referrer_id: &UserId,
        referred_full_name: &str,
    ) -> WalletResult<WalletSnapshot> {
        let bonus = self.config.referral_bonus;
        let tx = WalletTransaction::referral_bonus(*referrer_id, bonus, referred_full_name);

        let snapshot = self
            .repo
            .credit_referral(&tx)
            .await?
            .ok_or(WalletError::UserNotFound)?;

        tracing::info!(
            referrer_id = %referrer_id,
            bonus = %bonus,
            balance = %snapshot.balance,
            "Referral bonus credited"
        );

        Ok(snapshot)
    }

    /// Reserve funds for a withdrawal. Minimum is checked before balance.
    pub async fn debit_for_withdrawal(
        &self,
        user_id: &UserId,
        amount: Money,
        method: PaymentMethod,
    ) -> WalletResult<WalletSnapshot> {
        let minimum = self.config.minimum_withdrawal;
        if !amount.is_positive() || amount < minimum {
            return Err(WalletError::BelowMinimum { minimum });
        }

        let tx = WalletTransaction::withdrawal(*user_id, amount, method);
        let snapshot = self.repo.debit(&tx).await?;

        tracing::info!(
            user_id = %user_id,
            amount = %amount,
            balance = %snapshot.balance,
            "Withdrawal amount reserved"
        );

        Ok(snapshot)
    }

    /// Reject a pending request and return its amount in one step.
    /// `None` when the request is no longer pending.
    pub async fn refund_withdrawal(
        &self,
        request: &WithdrawalRequest,
        admin_notes: Option<&str>,
    ) -> WalletResult<Option<WithdrawalRequest>> {
        let tx = WalletTransaction::withdrawal_refund(
            request.user_id,
            request.amount,
            &request.withdrawal_id,
        );

        let rejected = self
            .repo
            .reject_and_refund(&request.withdrawal_id, &tx, admin_notes)
            .await?;

        if rejected.is_some() {
            tracing::info!(
                user_id = %request.user_id,
                withdrawal_id = %request.withdrawal_id,
                amount = %request.amount,
                "Withdrawal refunded"
            );
        }

        Ok(rejected)
    }
}
