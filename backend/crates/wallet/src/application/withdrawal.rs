//! Withdrawal Use Case
//!
//! `pending` -> `approved` | `rejected`. Funds are reserved when the request
//! is made; approval only records the decision. Rejection and its refund
//! are one storage update, so a rejected request always has its refund.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{UserId, WithdrawalId};
use kernel::money::Money;

use crate::application::config::WalletConfig;
use crate::application::ledger::LedgerUseCase;
use crate::domain::entities::{WithdrawalRequest, WithdrawalWithOwner};
use crate::domain::repository::{LedgerRepository, WithdrawalRepository};
use crate::domain::value_objects::{PaymentId, PaymentMethod, WithdrawalStatus};
use crate::error::{WalletError, WalletResult};

pub struct RequestWithdrawalInput {
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_id: PaymentId,
}

pub struct ProcessWithdrawalInput {
    pub status: WithdrawalStatus,
    pub admin_notes: Option<String>,
}

pub struct ProcessWithdrawalOutput {
    pub request: WithdrawalRequest,
    /// `false` when the request already had the requested status
    pub changed: bool,
}

pub struct WithdrawalUseCase<R>
where
    R: WithdrawalRepository + LedgerRepository,
{
    repo: Arc<R>,
    config: Arc<WalletConfig>,
}

impl<R> WithdrawalUseCase<R>
where
    R: WithdrawalRepository + LedgerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<WalletConfig>) -> Self {
        Self { repo, config }
    }

    fn ledger(&self) -> LedgerUseCase<R> {
        LedgerUseCase::new(self.repo.clone(), self.config.clone())
    }

    /// Reserve the amount, then record a pending request.
    pub async fn request(
        &self,
        user_id: &UserId,
        input: RequestWithdrawalInput,
    ) -> WalletResult<WithdrawalRequest> {
        self.ledger()
            .debit_for_withdrawal(user_id, input.amount, input.payment_method)
            .await?;

        let request = WithdrawalRequest::pending(
            *user_id,
            input.amount,
            input.payment_method,
            input.payment_id,
        );

        if let Err(e) = self.repo.create(&request).await {
            // Funds stay reserved without a request; needs manual repair.
            tracing::error!(
                user_id = %user_id,
                amount = %input.amount,
                error = %e,
                "Withdrawal debited but request was not recorded"
            );
            return Err(e);
        }

        tracing::info!(
            user_id = %user_id,
            withdrawal_id = %request.withdrawal_id,
            amount = %request.amount,
            payment_method = request.payment_method.as_str(),
            "Withdrawal requested"
        );

        Ok(request)
    }

    /// Admin decision. A request leaves `pending` exactly once; repeating
    /// the same decision is a no-op, a different one is a conflict.
    pub async fn process(
        &self,
        withdrawal_id: &WithdrawalId,
        input: ProcessWithdrawalInput,
    ) -> WalletResult<ProcessWithdrawalOutput> {
        if !input.status.is_terminal() {
            return Err(WalletError::Validation(
                "Status must be approved or rejected".into(),
            ));
        }

        let admin_notes = input
            .admin_notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let existing = self
            .repo
            .find_by_id(withdrawal_id)
            .await?
            .ok_or(WalletError::WithdrawalNotFound)?;
        if existing.status != WithdrawalStatus::Pending {
            return settled(existing, input.status);
        }

        let claimed = match input.status {
            WithdrawalStatus::Rejected => {
                self.ledger()
                    .refund_withdrawal(&existing, admin_notes)
                    .await?
            }
            _ => {
                self.repo
                    .approve(withdrawal_id, Utc::now(), admin_notes)
                    .await?
            }
        };

        let Some(request) = claimed else {
            // Another decision landed between the lookup and the claim
            let current = self
                .repo
                .find_by_id(withdrawal_id)
                .await?
                .ok_or(WalletError::WithdrawalNotFound)?;
            return settled(current, input.status);
        };

        tracing::info!(
            withdrawal_id = %request.withdrawal_id,
            status = request.status.as_str(),
            "Withdrawal processed"
        );

        Ok(ProcessWithdrawalOutput {
            request,
            changed: true,
        })
    }

    pub async fn list_for_user(&self, user_id: &UserId) -> WalletResult<Vec<WithdrawalRequest>> {
        self.repo
            .list_for_user(user_id, self.config.list_limit)
            .await
    }

    pub async fn list_all(&self) -> WalletResult<Vec<WithdrawalWithOwner>> {
        self.repo.list_all_with_owner(self.config.list_limit).await
    }
}

/// Outcome for a request that already left `pending`: the same decision is
/// a no-op, a different one a conflict.
fn settled(
    existing: WithdrawalRequest,
    requested: WithdrawalStatus,
) -> WalletResult<ProcessWithdrawalOutput> {
    if existing.status != requested {
        return Err(WalletError::WithdrawalAlreadyProcessed(
            existing.status.as_str(),
        ));
    }

    tracing::info!(
        withdrawal_id = %existing.withdrawal_id,
        status = existing.status.as_str(),
        "Withdrawal already processed with the same status"
    );

    Ok(ProcessWithdrawalOutput {
        request: existing,
        changed: false,
    })
}
