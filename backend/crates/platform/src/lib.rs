//! Platform Crate - Technical Infrastructure
//!
//! Technical foundations shared by the domain crates:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, base64url)
//! - Password hashing (Argon2id, NIST SP 800-63B policy)
//! - Bearer credential extraction from request headers

pub mod bearer;
pub mod crypto;
pub mod password;
