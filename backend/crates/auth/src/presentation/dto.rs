//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::money::Money;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub wallet_balance: Money,
    pub total_earned: Money,
    pub ads_watched: i64,
    pub referral_code: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            email: user.email.as_str().to_string(),
            full_name: user.full_name.as_str().to_string(),
            wallet_balance: user.wallet_balance,
            total_earned: user.total_earned,
            ads_watched: user.ads_watched,
            referral_code: user.referral_code.as_str().to_string(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}
