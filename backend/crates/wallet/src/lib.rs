//! Wallet Backend Module
//!
//! Balances, the append-only ledger and withdrawal requests.
//!
//! Clean Architecture structure:
//! - `domain/` - Ledger entities, value objects, repository traits
//! - `application/` - Ledger, withdrawal, query and stats use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Ledger rules
//! - Every balance change is one atomic statement that also writes its
//!   ledger row, so history always reconciles to the balance
//! - Withdrawals reserve funds at request time; rejection refunds them
//! - A withdrawal leaves `pending` exactly once

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{LedgerReferralRewarder, WalletConfig};
pub use domain::repository::WalletStore;
pub use error::{WalletError, WalletResult};
pub use infra::postgres::PgWalletRepository;
pub use presentation::router::wallet_router;
