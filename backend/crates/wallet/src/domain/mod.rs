//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{
    AdWatch, PlatformStats, WalletSnapshot, WalletTransaction, WithdrawalRequest,
    WithdrawalWithOwner,
};
pub use repository::{
    LedgerRepository, StatsRepository, TransactionRepository, WalletStore,
    WithdrawalRepository,
};
pub use value_objects::{AdType, PaymentId, PaymentMethod, TransactionKind, WithdrawalStatus};
