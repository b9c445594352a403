//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::money::Money;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, full_name::FullName, referral_code::ReferralCode, user_id::UserId,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: UserLookup, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("{} WHERE {} = $1", SELECT_USER, column.as_sql());
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

const SELECT_USER: &str = r#"
    SELECT
        user_id,
        email,
        password_hash,
        full_name,
        wallet_balance,
        total_earned,
        ads_watched,
        referral_code,
        referred_by,
        is_admin,
        created_at
    FROM users
"#;

/// Text columns with a unique index
#[derive(Clone, Copy)]
enum UserLookup {
    Email,
    ReferralCode,
}

impl UserLookup {
    fn as_sql(self) -> &'static str {
        match self {
            UserLookup::Email => "email",
            UserLookup::ReferralCode => "referral_code",
        }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                full_name,
                wallet_balance,
                total_earned,
                ads_watched,
                referral_code,
                referred_by,
                is_admin,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.full_name.as_str())
        .bind(user.wallet_balance.minor())
        .bind(user.total_earned.minor())
        .bind(user.ads_watched)
        .bind(user.referral_code.as_str())
        .bind(user.referred_by.map(UserId::into_uuid))
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if AuthError::is_email_conflict(&e) {
                AuthError::EmailTaken
            } else if AuthError::is_referral_code_conflict(&e) {
                AuthError::ReferralCodeTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("{} WHERE user_id = $1", SELECT_USER);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one(UserLookup::Email, email.as_str()).await
    }

    async fn find_by_referral_code(&self, code: &ReferralCode) -> AuthResult<Option<User>> {
        self.find_one(UserLookup::ReferralCode, code.as_str()).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    wallet_balance: i64,
    total_earned: i64,
    ads_watched: i64,
    referral_code: String,
    referred_by: Option<Uuid>,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            full_name: FullName::from_db(self.full_name),
            wallet_balance: Money::from_minor(self.wallet_balance),
            total_earned: Money::from_minor(self.total_earned),
            ads_watched: self.ads_watched,
            referral_code: ReferralCode::from_db(self.referral_code),
            referred_by: self.referred_by.map(UserId::from_uuid),
            is_admin: self.is_admin,
            created_at: self.created_at,
        })
    }
}
