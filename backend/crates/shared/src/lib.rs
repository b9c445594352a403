//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the auth and wallet domains:
//! - Common error types and result aliases
//! - Typed entity identifiers
//! - Monetary amounts in minor units
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod money;
