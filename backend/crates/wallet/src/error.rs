//! Wallet Error Types
//!
//! Ledger and withdrawal errors, integrated with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::money::{Money, MoneyError};
use thiserror::Error;

pub type WalletResult<T> = Result<T, WalletError>;

#[derive(Debug, Error)]
pub enum WalletError {
    /// Malformed input, rejected before storage is touched
    #[error("{0}")]
    Validation(String),

    #[error("Minimum withdrawal amount is ${minimum}")]
    BelowMinimum { minimum: Money },

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("User not found")]
    UserNotFound,

    #[error("Withdrawal request not found")]
    WithdrawalNotFound,

    /// Already approved or rejected with a different status
    #[error("Withdrawal request already {0}")]
    WithdrawalAlreadyProcessed(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WalletError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::Validation(_)
            | WalletError::BelowMinimum { .. }
            | WalletError::InsufficientFunds => ErrorKind::BadRequest,
            WalletError::UserNotFound | WalletError::WithdrawalNotFound => ErrorKind::NotFound,
            WalletError::WithdrawalAlreadyProcessed(_) => ErrorKind::Conflict,
            WalletError::Database(e) => AppError::from(e).kind(),
            WalletError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            WalletError::Database(e) => AppError::from(e),
            WalletError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            WalletError::Database(e) => {
                tracing::error!(error = %e, "Wallet database error");
            }
            WalletError::Internal(msg) => {
                tracing::error!(message = %msg, "Wallet internal error");
            }
            WalletError::WithdrawalAlreadyProcessed(status) => {
                tracing::warn!(status = %status, "Attempt to re-process a withdrawal");
            }
            _ => {
                tracing::debug!(error = %self, "Wallet error");
            }
        }
    }
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<MoneyError> for WalletError {
    fn from(err: MoneyError) -> Self {
        WalletError::Validation(err.to_string())
    }
}
