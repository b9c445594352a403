//! Sign In Use Case
//!
//! Verifies email and password and issues an access token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::sign_up::AuthOutput;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Every failure is `InvalidCredentials`, whichever half was wrong.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<AuthOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::for_login(input.password);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = TokenService::new(&self.config).issue(&user.user_id, &user.email, Utc::now())?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(AuthOutput { token, user })
    }
}
