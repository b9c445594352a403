//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every balance change is a single atomic storage operation that also
//! appends its ledger row; there is never a read-modify-write of a balance.

use chrono::{DateTime, Utc};
use kernel::id::{UserId, WithdrawalId};

use crate::domain::entities::{
    AdWatch, PlatformStats, WalletSnapshot, WalletTransaction, WithdrawalRequest,
    WithdrawalWithOwner,
};
use crate::error::WalletResult;

/// Balance mutations
#[trait_variant::make(LedgerRepository: Send)]
pub trait LocalLedgerRepository {
    /// Add `tx.amount` to balance and total earned, bump the ad counter,
    /// append `tx` and `watch`. `None` if the user does not exist.
    async fn credit_ad_reward(
        &self,
        tx: &WalletTransaction,
        watch: &AdWatch,
    ) -> WalletResult<Option<WalletSnapshot>>;

    /// Add `tx.amount` to balance and total earned, append `tx`.
    /// `None` if the user does not exist.
    async fn credit_referral(&self, tx: &WalletTransaction)
    -> WalletResult<Option<WalletSnapshot>>;

    /// Subtract `-tx.amount` from the balance only if it stays non-negative,
    /// append `tx`. Fails with `InsufficientFunds` or `UserNotFound`.
    async fn debit(&self, tx: &WalletTransaction) -> WalletResult<WalletSnapshot>;

    /// Move a *pending* request owned by `tx.user_id` for `tx.amount` to
    /// `rejected` as of `tx.created_at`, add `tx.amount` back to the balance
    /// (total earned untouched) and append `tx`, all or nothing. `None` when
    /// the request was not pending.
    async fn reject_and_refund(
        &self,
        withdrawal_id: &WithdrawalId,
        tx: &WalletTransaction,
        admin_notes: Option<&str>,
    ) -> WalletResult<Option<WithdrawalRequest>>;

    async fn snapshot(&self, user_id: &UserId) -> WalletResult<Option<WalletSnapshot>>;
}

/// Ledger history reads
#[trait_variant::make(TransactionRepository: Send)]
pub trait LocalTransactionRepository {
    /// Newest first
    async fn list_recent(&self, user_id: &UserId, limit: i64)
    -> WalletResult<Vec<WalletTransaction>>;
}

#[trait_variant::make(WithdrawalRepository: Send)]
pub trait LocalWithdrawalRepository {
    async fn create(&self, request: &WithdrawalRequest) -> WalletResult<()>;

    async fn find_by_id(&self, id: &WithdrawalId) -> WalletResult<Option<WithdrawalRequest>>;

    /// Move a *pending* request to `approved`. Returns the updated request,
    /// or `None` when it was not pending (or does not exist).
    async fn approve(
        &self,
        id: &WithdrawalId,
        processed_at: DateTime<Utc>,
        admin_notes: Option<&str>,
    ) -> WalletResult<Option<WithdrawalRequest>>;

    /// Newest first
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> WalletResult<Vec<WithdrawalRequest>>;

    /// Newest first, joined with the owner's name and email
    async fn list_all_with_owner(&self, limit: i64) -> WalletResult<Vec<WithdrawalWithOwner>>;
}

#[trait_variant::make(StatsRepository: Send)]
pub trait LocalStatsRepository {
    async fn platform_stats(&self) -> WalletResult<PlatformStats>;
}

/// Everything the wallet routes need from one storage backend
pub trait WalletStore:
    LedgerRepository
    + TransactionRepository
    + WithdrawalRepository
    + StatsRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> WalletStore for T where
    T: LedgerRepository
        + TransactionRepository
            + WithdrawalRepository
        + StatsRepository
        + Send
        + Sync
        + 'static
{
}
