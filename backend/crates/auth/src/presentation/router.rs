//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::{ReferralRewarder, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_user};

/// `/auth/signup`, `/auth/login` and the protected `/auth/me`
pub fn auth_router<R, B>(repo: Arc<R>, rewarder: Arc<B>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    B: ReferralRewarder + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState {
        repo: repo.clone(),
        config: config.clone(),
    };

    let state = AuthAppState {
        repo,
        rewarder,
        config,
    };

    let public = Router::new()
        .route("/auth/signup", post(handlers::sign_up::<R, B>))
        .route("/auth/login", post(handlers::login::<R, B>))
        .with_state(state);

    let protected = Router::new()
        .route("/auth/me", get(handlers::me))
        .route_layer(from_fn_with_state(guard, require_user::<R>));

    public.merge(protected)
}
