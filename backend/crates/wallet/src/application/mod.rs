//! Application Layer
//!
//! Use cases and application services.

pub mod admin_stats;
pub mod config;
pub mod ledger;
pub mod referral;
pub mod wallet_query;
pub mod withdrawal;

// Re-exports
pub use admin_stats::AdminStatsUseCase;
pub use config::WalletConfig;
pub use ledger::{AdRewardOutput, LedgerUseCase};
pub use referral::LedgerReferralRewarder;
pub use wallet_query::WalletQueryUseCase;
pub use withdrawal::{
    ProcessWithdrawalInput, ProcessWithdrawalOutput, RequestWithdrawalInput, WithdrawalUseCase,
};
