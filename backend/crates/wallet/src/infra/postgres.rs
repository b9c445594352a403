//! PostgreSQL Repository Implementations
//!
//! Balance changes are single statements: the `users` update and the
//! `wallet_transactions` insert run in one data-modifying CTE, so a ledger
//! row exists exactly when its balance change was applied. The ad-watch
//! row and a rejection's status change ride in the same statement.

use chrono::{DateTime, Utc};
use kernel::id::{TransactionId, UserId, WithdrawalId};
use kernel::money::Money;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::domain::entities::{
    AdWatch, PlatformStats, WalletSnapshot, WalletTransaction, WithdrawalRequest,
    WithdrawalWithOwner,
};
use crate::domain::repository::{
    LedgerRepository, StatsRepository, TransactionRepository, WithdrawalRepository,
};
use crate::domain::value_objects::{PaymentId, PaymentMethod, TransactionKind, WithdrawalStatus};
use crate::error::{WalletError, WalletResult};

/// PostgreSQL-backed wallet store
#[derive(Clone)]
pub struct PgWalletRepository {
    pool: PgPool,
}

impl PgWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, user_id: &UserId) -> WalletResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// Parameters shared by every ledger statement:
// $1 user_id, $2 signed amount, $3 transaction_id, $4 kind, $5 description, $6 created_at

const CREDIT_AD_REWARD: &str = r#"
    WITH updated AS (
        UPDATE users
        SET wallet_balance = wallet_balance + $2,
            total_earned = total_earned + $2,
            ads_watched = ads_watched + 1
        WHERE user_id = $1
        RETURNING user_id, wallet_balance, total_earned, ads_watched
    ), entry AS (
        INSERT INTO wallet_transactions (transaction_id, user_id, kind, amount, description, created_at)
        SELECT $3, user_id, $4, $2, $5, $6 FROM updated
    ), watch AS (
        INSERT INTO ad_watches (ad_watch_id, user_id, ad_type, reward, watched_at)
        SELECT $7, user_id, $8, $2, $9 FROM updated
    )
    SELECT wallet_balance, total_earned, ads_watched FROM updated
"#;

const CREDIT_REFERRAL: &str = r#"
    WITH updated AS (
        UPDATE users
        SET wallet_balance = wallet_balance + $2,
            total_earned = total_earned + $2
        WHERE user_id = $1
        RETURNING user_id, wallet_balance, total_earned, ads_watched
    ), entry AS (
        INSERT INTO wallet_transactions (transaction_id, user_id, kind, amount, description, created_at)
        SELECT $3, user_id, $4, $2, $5, $6 FROM updated
    )
    SELECT wallet_balance, total_earned, ads_watched FROM updated
"#;

const DEBIT: &str = r#"
    WITH updated AS (
        UPDATE users
        SET wallet_balance = wallet_balance + $2
        WHERE user_id = $1 AND wallet_balance + $2 >= 0
        RETURNING user_id, wallet_balance, total_earned, ads_watched
    ), entry AS (
        INSERT INTO wallet_transactions (transaction_id, user_id, kind, amount, description, created_at)
        SELECT $3, user_id, $4, $2, $5, $6 FROM updated
    )
    SELECT wallet_balance, total_earned, ads_watched FROM updated
"#;

// $7 withdrawal_id, $8 admin_notes; the claim only matches a pending
// request of this user for exactly this amount.
const REJECT_AND_REFUND: &str = r#"
    WITH claimed AS (
        UPDATE withdrawal_requests
        SET status = 'rejected',
            processed_at = $6,
            admin_notes = COALESCE($8, admin_notes)
        WHERE withdrawal_id = $7 AND status = 'pending' AND user_id = $1 AND amount = $2
        RETURNING withdrawal_id, user_id, amount, payment_method, payment_id,
                  status, requested_at, processed_at, admin_notes
    ), refunded AS (
        UPDATE users
        SET wallet_balance = wallet_balance + $2
        WHERE user_id = (SELECT user_id FROM claimed)
        RETURNING user_id
    ), entry AS (
        INSERT INTO wallet_transactions (transaction_id, user_id, kind, amount, description, created_at)
        SELECT $3, user_id, $4, $2, $5, $6 FROM refunded
    )
    SELECT withdrawal_id, user_id, amount, payment_method, payment_id,
           status, requested_at, processed_at, admin_notes
    FROM claimed
"#;

fn ledger_statement<'q, O>(
    sql: &'q str,
    tx: &'q WalletTransaction,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    sqlx::query_as::<_, O>(sql)
        .bind(tx.user_id.as_uuid())
        .bind(tx.amount.minor())
        .bind(tx.transaction_id.as_uuid())
        .bind(tx.kind.as_str())
        .bind(tx.description.as_str())
        .bind(tx.created_at)
}

// ============================================================================
// Ledger Repository Implementation
// ============================================================================

impl LedgerRepository for PgWalletRepository {
    async fn credit_ad_reward(
        &self,
        tx: &WalletTransaction,
        watch: &AdWatch,
    ) -> WalletResult<Option<WalletSnapshot>> {
        let row: Option<SnapshotRow> = ledger_statement(CREDIT_AD_REWARD, tx)
            .bind(watch.ad_watch_id.as_uuid())
            .bind(watch.ad_type.as_str())
            .bind(watch.watched_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SnapshotRow::into_snapshot))
    }

    async fn credit_referral(
        &self,
        tx: &WalletTransaction,
    ) -> WalletResult<Option<WalletSnapshot>> {
        let row: Option<SnapshotRow> = ledger_statement(CREDIT_REFERRAL, tx)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SnapshotRow::into_snapshot))
    }

    async fn debit(&self, tx: &WalletTransaction) -> WalletResult<WalletSnapshot> {
        let row: Option<SnapshotRow> = ledger_statement(DEBIT, tx)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            return Ok(row.into_snapshot());
        }

        // Nothing updated: either the guard failed or there is no such user
        if self.user_exists(&tx.user_id).await? {
            Err(WalletError::InsufficientFunds)
        } else {
            Err(WalletError::UserNotFound)
        }
    }

    async fn reject_and_refund(
        &self,
        withdrawal_id: &WithdrawalId,
        tx: &WalletTransaction,
        admin_notes: Option<&str>,
    ) -> WalletResult<Option<WithdrawalRequest>> {
        let row: Option<WithdrawalRow> = ledger_statement(REJECT_AND_REFUND, tx)
            .bind(withdrawal_id.as_uuid())
            .bind(admin_notes)
            .fetch_optional(&self.pool)
            .await?;

        row.map(WithdrawalRow::into_request).transpose()
    }

    async fn snapshot(&self, user_id: &UserId) -> WalletResult<Option<WalletSnapshot>> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            "SELECT wallet_balance, total_earned, ads_watched FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SnapshotRow::into_snapshot))
    }
}

// ============================================================================
// Transaction Repository Implementation
// ============================================================================

impl TransactionRepository for PgWalletRepository {
    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> WalletResult<Vec<WalletTransaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT transaction_id, user_id, kind, amount, description, created_at
            FROM wallet_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_transaction).collect()
    }
}

// ============================================================================
// Withdrawal Repository Implementation
// ============================================================================

const WITHDRAWAL_COLUMNS: &str = r#"
    withdrawal_id,
    user_id,
    amount,
    payment_method,
    payment_id,
    status,
    requested_at,
    processed_at,
    admin_notes
"#;

impl WithdrawalRepository for PgWalletRepository {
    async fn create(&self, request: &WithdrawalRequest) -> WalletResult<()> {
        sqlx::query(
            r#"
            INSERT INTO withdrawal_requests (
                withdrawal_id,
                user_id,
                amount,
                payment_method,
                payment_id,
                status,
                requested_at,
                processed_at,
                admin_notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(request.withdrawal_id.as_uuid())
        .bind(request.user_id.as_uuid())
        .bind(request.amount.minor())
        .bind(request.payment_method.as_str())
        .bind(request.payment_id.as_str())
        .bind(request.status.as_str())
        .bind(request.requested_at)
        .bind(request.processed_at)
        .bind(request.admin_notes.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &WithdrawalId) -> WalletResult<Option<WithdrawalRequest>> {
        let sql = format!(
            "SELECT {} FROM withdrawal_requests WHERE withdrawal_id = $1",
            WITHDRAWAL_COLUMNS
        );
        let row = sqlx::query_as::<_, WithdrawalRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(WithdrawalRow::into_request).transpose()
    }

    async fn approve(
        &self,
        id: &WithdrawalId,
        processed_at: DateTime<Utc>,
        admin_notes: Option<&str>,
    ) -> WalletResult<Option<WithdrawalRequest>> {
        let sql = format!(
            r#"
            UPDATE withdrawal_requests
            SET status = $2,
                processed_at = $3,
                admin_notes = COALESCE($4, admin_notes)
            WHERE withdrawal_id = $1 AND status = 'pending'
            RETURNING {}
            "#,
            WITHDRAWAL_COLUMNS
        );
        let row = sqlx::query_as::<_, WithdrawalRow>(&sql)
            .bind(id.as_uuid())
            .bind(WithdrawalStatus::Approved.as_str())
            .bind(processed_at)
            .bind(admin_notes)
            .fetch_optional(&self.pool)
            .await?;

        row.map(WithdrawalRow::into_request).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> WalletResult<Vec<WithdrawalRequest>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM withdrawal_requests
            WHERE user_id = $1
            ORDER BY requested_at DESC
            LIMIT $2
            "#,
            WITHDRAWAL_COLUMNS
        );
        let rows = sqlx::query_as::<_, WithdrawalRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(WithdrawalRow::into_request).collect()
    }

    async fn list_all_with_owner(&self, limit: i64) -> WalletResult<Vec<WithdrawalWithOwner>> {
        let rows = sqlx::query_as::<_, OwnedWithdrawalRow>(
            r#"
            SELECT
                w.withdrawal_id,
                w.user_id,
                w.amount,
                w.payment_method,
                w.payment_id,
                w.status,
                w.requested_at,
                w.processed_at,
                w.admin_notes,
                u.full_name AS user_name,
                u.email AS user_email
            FROM withdrawal_requests w
            LEFT JOIN users u ON u.user_id = w.user_id
            ORDER BY w.requested_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(WithdrawalWithOwner {
                    request: row.withdrawal.into_request()?,
                    user_name: row.user_name,
                    user_email: row.user_email,
                })
            })
            .collect()
    }
}

impl StatsRepository for PgWalletRepository {
    async fn platform_stats(&self) -> WalletResult<PlatformStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM withdrawal_requests) AS total_withdrawals,
                (SELECT COUNT(*) FROM withdrawal_requests WHERE status = 'pending') AS pending_withdrawals,
                (SELECT COUNT(*) FROM ad_watches) AS total_ads_watched
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PlatformStats {
            total_users: row.total_users,
            total_withdrawals: row.total_withdrawals,
            pending_withdrawals: row.pending_withdrawals,
            total_ads_watched: row.total_ads_watched,
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    wallet_balance: i64,
    total_earned: i64,
    ads_watched: i64,
}

impl SnapshotRow {
    fn into_snapshot(self) -> WalletSnapshot {
        WalletSnapshot {
            balance: Money::from_minor(self.wallet_balance),
            total_earned: Money::from_minor(self.total_earned),
            ads_watched: self.ads_watched,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    transaction_id: Uuid,
    user_id: Uuid,
    kind: String,
    amount: i64,
    description: String,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_transaction(self) -> WalletResult<WalletTransaction> {
        let kind = TransactionKind::parse(&self.kind).ok_or_else(|| {
            WalletError::Internal(format!("Unknown transaction kind in storage: {}", self.kind))
        })?;

        Ok(WalletTransaction {
            transaction_id: TransactionId::from_uuid(self.transaction_id),
            user_id: UserId::from_uuid(self.user_id),
            kind,
            amount: Money::from_minor(self.amount),
            description: self.description,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WithdrawalRow {
    withdrawal_id: Uuid,
    user_id: Uuid,
    amount: i64,
    payment_method: String,
    payment_id: String,
    status: String,
    requested_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    admin_notes: Option<String>,
}

impl WithdrawalRow {
    fn into_request(self) -> WalletResult<WithdrawalRequest> {
        let payment_method = PaymentMethod::parse(&self.payment_method).ok_or_else(|| {
            WalletError::Internal(format!(
                "Unknown payment method in storage: {}",
                self.payment_method
            ))
        })?;
        let status = WithdrawalStatus::parse(&self.status).ok_or_else(|| {
            WalletError::Internal(format!("Unknown withdrawal status in storage: {}", self.status))
        })?;

        Ok(WithdrawalRequest {
            withdrawal_id: WithdrawalId::from_uuid(self.withdrawal_id),
            user_id: UserId::from_uuid(self.user_id),
            amount: Money::from_minor(self.amount),
            payment_method,
            payment_id: PaymentId::from_db(self.payment_id),
            status,
            requested_at: self.requested_at,
            processed_at: self.processed_at,
            admin_notes: self.admin_notes,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OwnedWithdrawalRow {
    #[sqlx(flatten)]
    withdrawal: WithdrawalRow,
    user_name: Option<String>,
    user_email: Option<String>,
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_users: i64,
    total_withdrawals: i64,
    pending_withdrawals: i64,
    total_ads_watched: i64,
}
