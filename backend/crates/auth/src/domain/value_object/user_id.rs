//! User identifier
//!
//! Shared with the wallet crate through the kernel, so a wallet row and
//! the user it belongs to agree on the id type.

pub use kernel::id::UserId;
