//! HTTP Handlers

use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::{ReferralRewarder, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{AuthResponse, LoginRequest, SignUpRequest, UserProfile};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, B> {
    pub repo: Arc<R>,
    pub rewarder: Arc<B>,
    pub config: Arc<AuthConfig>,
}

impl<R, B> Clone for AuthAppState<R, B> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            rewarder: self.rewarder.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/auth/signup
pub async fn sign_up<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    B: ReferralRewarder + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.rewarder.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            referral_code: req.referral_code,
        })
        .await?;

    Ok(Json(AuthResponse {
        user: UserProfile::from(&output.user),
        token: output.token,
    }))
}

/// POST /api/auth/login
pub async fn login<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    B: ReferralRewarder + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        user: UserProfile::from(&output.user),
        token: output.token,
    }))
}

/// GET /api/auth/me
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}
