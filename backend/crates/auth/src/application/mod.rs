//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod current_user;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{AuthOutput, SignUpInput, SignUpUseCase};
pub use token::{AccessClaims, TokenService};
