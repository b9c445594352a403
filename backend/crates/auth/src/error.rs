//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PasswordValidation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    TokenMissing,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Admin access required")]
    AdminRequired,

    #[error("User not found")]
    UserNotFound,

    /// Generated code collided with an existing one
    #[error("Referral code already in use")]
    ReferralCodeTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken
            | AuthError::Validation(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(e) => AppError::from(e).kind(),
            AuthError::ReferralCodeTaken | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Server-side details never reach the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            AuthError::ReferralCodeTaken | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::TokenMissing | AuthError::TokenInvalid | AuthError::TokenExpired => {
                AppError::new(self.kind(), self.to_string()).with_action("Log in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::ReferralCodeTaken => {
                tracing::error!("Referral code collisions exhausted all attempts");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AdminRequired => {
                tracing::warn!("Non-admin attempted an admin route");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }

    /// Unique violation on the email index (concurrent signups).
    pub(crate) fn is_email_conflict(err: &sqlx::Error) -> bool {
        violates_unique(err, "users_email_key")
    }

    /// Unique violation on the generated referral code.
    pub(crate) fn is_referral_code_conflict(err: &sqlx::Error) -> bool {
        violates_unique(err, "users_referral_code_key")
    }
}

fn violates_unique(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.code().as_deref() == Some("23505") && db.constraint() == Some(constraint)
        }
        _ => false,
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
