//! Auth Middleware
//!
//! `require_user` resolves the bearer token and stores the caller as a
//! [`CurrentUser`] request extension. `require_admin` must run after it.
//!
//! ```ignore
//! Router::new()
//!     .route("/admin/stats", get(stats))
//!     .route_layer(from_fn(require_admin))
//!     .route_layer(from_fn_with_state(auth_state, require_user::<R>));
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::CurrentUserUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthMiddlewareState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Authenticated caller, available to handlers behind `require_user`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// 401 unless the request carries a valid bearer token for an existing user
pub async fn require_user<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = platform::bearer::bearer_token(req.headers())
        .ok_or(AuthError::TokenMissing)?
        .to_string();

    let use_case = CurrentUserUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(&token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// 403 unless the caller resolved by `require_user` is an admin
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    let is_admin = match req.extensions().get::<CurrentUser>() {
        Some(CurrentUser(user)) => user.is_admin,
        None => return Err(AuthError::TokenMissing),
    };

    if !is_admin {
        return Err(AuthError::AdminRequired);
    }

    Ok(next.run(req).await)
}
