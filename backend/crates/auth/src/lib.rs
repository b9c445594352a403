//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Signup with email + password, optional referral code
//! - Login returning a signed bearer token (24h)
//! - `require_user` / `require_admin` middleware for other crates' routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Tokens are HMAC-SHA256 signed claims; verification fails closed
//! - Admin status comes only from the configured admin email list

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::repository::{ReferralRewarder, UserRepository};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthMiddlewareState, CurrentUser, require_admin, require_user};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::AppError,
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::user::User;
    pub use crate::domain::value_object::{
        email::Email, full_name::FullName, referral_code::ReferralCode, user_id::UserId,
        user_password::{RawPassword, UserPassword},
    };
    pub use crate::presentation::dto::*;
}
