//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{TransactionId, UserId, WithdrawalId};
use kernel::money::Money;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    PlatformStats, WalletSnapshot, WalletTransaction, WithdrawalRequest, WithdrawalWithOwner,
};
use crate::domain::value_objects::{PaymentMethod, TransactionKind, WithdrawalStatus};

/// Shown in the admin list when the owner row no longer exists
pub const UNKNOWN_OWNER: &str = "Unknown";

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchAdRequest {
    #[serde(default)]
    pub ad_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalRequestBody {
    pub amount: f64,
    pub payment_method: String,
    pub payment_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWithdrawalBody {
    pub status: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchAdResponse {
    pub message: &'static str,
    pub reward: Money,
    pub new_balance: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub balance: Money,
    pub total_earned: Money,
    pub ads_watched: i64,
}

impl From<WalletSnapshot> for BalanceResponse {
    fn from(snapshot: WalletSnapshot) -> Self {
        Self {
            balance: snapshot.balance,
            total_earned: snapshot.total_earned,
            ads_watched: snapshot.ads_watched,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionDto {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<WalletTransaction> for TransactionDto {
    fn from(tx: WalletTransaction) -> Self {
        Self {
            id: tx.transaction_id,
            kind: tx.kind,
            amount: tx.amount,
            description: tx.description,
            created_at: tx.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalCreatedResponse {
    pub message: &'static str,
    pub request_id: WithdrawalId,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalDto {
    pub id: WithdrawalId,
    pub user_id: UserId,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_id: String,
    pub status: WithdrawalStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
}

impl From<WithdrawalRequest> for WithdrawalDto {
    fn from(request: WithdrawalRequest) -> Self {
        Self {
            id: request.withdrawal_id,
            user_id: request.user_id,
            amount: request.amount,
            payment_method: request.payment_method,
            payment_id: request.payment_id.as_str().to_string(),
            status: request.status,
            requested_at: request.requested_at,
            processed_at: request.processed_at,
            admin_notes: request.admin_notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminWithdrawalDto {
    #[serde(flatten)]
    pub withdrawal: WithdrawalDto,
    pub user_name: String,
    pub user_email: String,
}

impl From<WithdrawalWithOwner> for AdminWithdrawalDto {
    fn from(row: WithdrawalWithOwner) -> Self {
        Self {
            withdrawal: WithdrawalDto::from(row.request),
            user_name: row.user_name.unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
            user_email: row.user_email.unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_withdrawals: i64,
    pub pending_withdrawals: i64,
    pub total_ads_watched: i64,
}

impl From<PlatformStats> for StatsResponse {
    fn from(stats: PlatformStats) -> Self {
        Self {
            total_users: stats.total_users,
            total_withdrawals: stats.total_withdrawals,
            pending_withdrawals: stats.pending_withdrawals,
            total_ads_watched: stats.total_ads_watched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PaymentId;

    #[test]
    fn test_admin_row_without_owner() {
        let request = WithdrawalRequest::pending(
            UserId::new(),
            Money::from_minor(2500),
            PaymentMethod::Esewa,
            PaymentId::new("9811111111").unwrap(),
        );
        let dto = AdminWithdrawalDto::from(WithdrawalWithOwner {
            request,
            user_name: None,
            user_email: None,
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["user_name"], "Unknown");
        assert_eq!(json["user_email"], "Unknown");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["payment_method"], "esewa");
        assert_eq!(json["amount"], 25.0);
        assert!(json["processed_at"].is_null());
    }

    #[test]
    fn test_transaction_kind_is_serialized_as_type() {
        let tx = WalletTransaction::withdrawal(
            UserId::new(),
            Money::from_minor(1000),
            PaymentMethod::Khalti,
        );
        let json = serde_json::to_value(TransactionDto::from(tx)).unwrap();
        assert_eq!(json["type"], "withdrawal");
        assert_eq!(json["amount"], -10.0);
    }
}
