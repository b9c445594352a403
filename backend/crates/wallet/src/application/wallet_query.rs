//! Wallet Query Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::WalletConfig;
use crate::domain::entities::{WalletSnapshot, WalletTransaction};
use crate::domain::repository::{LedgerRepository, TransactionRepository};
use crate::error::{WalletError, WalletResult};

pub struct WalletQueryUseCase<R>
where
    R: LedgerRepository + TransactionRepository,
{
    repo: Arc<R>,
    config: Arc<WalletConfig>,
}

impl<R> WalletQueryUseCase<R>
where
    R: LedgerRepository + TransactionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<WalletConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn balance(&self, user_id: &UserId) -> WalletResult<WalletSnapshot> {
        self.repo
            .snapshot(user_id)
            .await?
            .ok_or(WalletError::UserNotFound)
    }

    /// Most recent ledger rows, newest first
    pub async fn transactions(&self, user_id: &UserId) -> WalletResult<Vec<WalletTransaction>> {
        self.repo.list_recent(user_id, self.config.list_limit).await
    }
}
