//! Referral Rewarder
//!
//! Plugs the ledger into sign-up: `auth` decides who gets the bonus,
//! this pays it.

use std::sync::Arc;

use auth::{AuthError, AuthResult, ReferralRewarder};
use kernel::id::UserId;

use crate::application::config::WalletConfig;
use crate::application::ledger::LedgerUseCase;
use crate::domain::repository::LedgerRepository;
use crate::error::WalletError;

pub struct LedgerReferralRewarder<R>
where
    R: LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<WalletConfig>,
}

impl<R> LedgerReferralRewarder<R>
where
    R: LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<WalletConfig>) -> Self {
        Self { repo, config }
    }
}

impl<R> ReferralRewarder for LedgerReferralRewarder<R>
where
    R: LedgerRepository + Send + Sync,
{
    async fn reward_referrer(
        &self,
        referrer_id: &UserId,
        referred_full_name: &str,
    ) -> AuthResult<()> {
        let ledger = LedgerUseCase::new(self.repo.clone(), self.config.clone());

        match ledger
            .credit_referral_bonus(referrer_id, referred_full_name)
            .await
        {
            Ok(_) => Ok(()),
            // Referrer removed between lookup and credit; sign-up still succeeds
            Err(WalletError::UserNotFound) => {
                tracing::warn!(referrer_id = %referrer_id, "Referrer vanished before bonus was paid");
                Ok(())
            }
            Err(e) => Err(AuthError::Internal(e.to_string())),
        }
    }
}
