//! Resolve a bearer token to the user it was issued for.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// A valid signature for a user that no longer exists is still a 401.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let claims = TokenService::new(&self.config).verify(token)?;
        let user_id = claims.user_id()?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::TokenInvalid)
    }
}
