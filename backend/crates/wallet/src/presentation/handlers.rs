//! HTTP Handlers
//!
//! Every handler here runs behind `auth::require_user`; the admin ones also
//! behind `auth::require_admin`.

use std::sync::Arc;

use auth::CurrentUser;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use kernel::id::WithdrawalId;
use kernel::money::Money;

use crate::application::config::WalletConfig;
use crate::application::{
    AdminStatsUseCase, LedgerUseCase, ProcessWithdrawalInput, RequestWithdrawalInput,
    WalletQueryUseCase, WithdrawalUseCase,
};
use crate::domain::repository::WalletStore;
use crate::domain::value_objects::{AdType, PaymentId, PaymentMethod, WithdrawalStatus};
use crate::error::{WalletError, WalletResult};
use crate::presentation::dto::{
    AdminWithdrawalDto, BalanceResponse, MessageResponse, StatsResponse, TransactionDto,
    UpdateWithdrawalBody, WatchAdRequest, WatchAdResponse, WithdrawalCreatedResponse,
    WithdrawalDto, WithdrawalRequestBody,
};

/// Shared state for wallet handlers
pub struct WalletAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<WalletConfig>,
}

impl<R> Clone for WalletAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/ads/watch
pub async fn watch_ad<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    body: Option<Json<WatchAdRequest>>,
) -> WalletResult<Json<WatchAdResponse>> {
    let ad_type = match body.and_then(|Json(req)| req.ad_type) {
        Some(raw) => AdType::new(&raw)?,
        None => AdType::default(),
    };

    let output = LedgerUseCase::new(state.repo.clone(), state.config.clone())
        .credit_ad_reward(&user.user_id, ad_type)
        .await?;

    Ok(Json(WatchAdResponse {
        message: "Ad watched successfully!",
        reward: output.reward,
        new_balance: output.snapshot.balance,
    }))
}

/// GET /api/wallet/balance
pub async fn balance<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> WalletResult<Json<BalanceResponse>> {
    let snapshot = WalletQueryUseCase::new(state.repo.clone(), state.config.clone())
        .balance(&user.user_id)
        .await?;

    Ok(Json(snapshot.into()))
}

/// GET /api/wallet/transactions
pub async fn transactions<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> WalletResult<Json<Vec<TransactionDto>>> {
    let rows = WalletQueryUseCase::new(state.repo.clone(), state.config.clone())
        .transactions(&user.user_id)
        .await?;

    Ok(Json(rows.into_iter().map(TransactionDto::from).collect()))
}

/// POST /api/withdrawals/request
pub async fn request_withdrawal<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<WithdrawalRequestBody>,
) -> WalletResult<Json<WithdrawalCreatedResponse>> {
    let payment_method = PaymentMethod::parse(&req.payment_method).ok_or_else(|| {
        WalletError::Validation("Payment method must be esewa or khalti".into())
    })?;
    let input = RequestWithdrawalInput {
        amount: Money::from_major(req.amount)?,
        payment_method,
        payment_id: PaymentId::new(&req.payment_id)?,
    };

    let request = WithdrawalUseCase::new(state.repo.clone(), state.config.clone())
        .request(&user.user_id, input)
        .await?;

    Ok(Json(WithdrawalCreatedResponse {
        message: "Withdrawal request submitted successfully",
        request_id: request.withdrawal_id,
    }))
}

/// GET /api/withdrawals/my-requests
pub async fn my_withdrawals<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> WalletResult<Json<Vec<WithdrawalDto>>> {
    let requests = WithdrawalUseCase::new(state.repo.clone(), state.config.clone())
        .list_for_user(&user.user_id)
        .await?;

    Ok(Json(requests.into_iter().map(WithdrawalDto::from).collect()))
}

/// GET /api/admin/withdrawals
pub async fn admin_list_withdrawals<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
) -> WalletResult<Json<Vec<AdminWithdrawalDto>>> {
    let rows = WithdrawalUseCase::new(state.repo.clone(), state.config.clone())
        .list_all()
        .await?;

    Ok(Json(rows.into_iter().map(AdminWithdrawalDto::from).collect()))
}

/// PUT /api/admin/withdrawals/{id}
pub async fn admin_update_withdrawal<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateWithdrawalBody>,
) -> WalletResult<Json<MessageResponse>> {
    // An id that cannot exist is reported like one that does not
    let withdrawal_id =
        WithdrawalId::parse_str(&id).map_err(|_| WalletError::WithdrawalNotFound)?;
    let status = WithdrawalStatus::parse(&req.status).ok_or_else(|| {
        WalletError::Validation("Status must be approved or rejected".into())
    })?;

    let output = WithdrawalUseCase::new(state.repo.clone(), state.config.clone())
        .process(
            &withdrawal_id,
            ProcessWithdrawalInput {
                status,
                admin_notes: req.admin_notes,
            },
        )
        .await?;

    tracing::info!(
        admin_id = %admin.user_id,
        withdrawal_id = %withdrawal_id,
        status = output.request.status.as_str(),
        changed = output.changed,
        "Admin processed withdrawal"
    );

    Ok(Json(MessageResponse {
        message: format!("Withdrawal {} successfully", output.request.status.as_str()),
    }))
}

/// GET /api/admin/stats
pub async fn admin_stats<R: WalletStore>(
    State(state): State<WalletAppState<R>>,
) -> WalletResult<Json<StatsResponse>> {
    let stats = AdminStatsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(stats.into()))
}
