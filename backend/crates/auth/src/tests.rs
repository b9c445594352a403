//! Use case and router tests against an in-memory user store

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use tower::ServiceExt;

use crate::application::{
    AuthConfig, CurrentUserUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    TokenService,
};
use crate::domain::entity::user::User;
use crate::domain::repository::{ReferralRewarder, UserRepository};
use crate::domain::value_object::{email::Email, referral_code::ReferralCode, user_id::UserId};
use crate::error::{AuthError, AuthResult};
use crate::presentation::middleware::{AuthMiddlewareState, require_admin, require_user};
use crate::presentation::router::auth_router;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct MemoryUsers {
    users: Mutex<Vec<User>>,
    /// Inserts that fail as if the generated referral code were taken
    code_collisions: Mutex<usize>,
}

impl MemoryUsers {
    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| pred(u)).cloned()
    }

    fn remove(&self, user_id: &UserId) {
        self.users.lock().unwrap().retain(|u| &u.user_id != user_id);
    }
}

impl UserRepository for MemoryUsers {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        let mut collisions = self.code_collisions.lock().unwrap();
        if *collisions > 0 || users.iter().any(|u| u.referral_code == user.referral_code) {
            *collisions = collisions.saturating_sub(1);
            return Err(AuthError::ReferralCodeTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.find(|u| &u.user_id == user_id))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.find(|u| &u.email == email))
    }

    async fn find_by_referral_code(&self, code: &ReferralCode) -> AuthResult<Option<User>> {
        Ok(self.find(|u| &u.referral_code == code))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.find(|u| &u.email == email).is_some())
    }
}

#[derive(Default)]
struct RecordingRewarder {
    calls: Mutex<Vec<(UserId, String)>>,
}

impl ReferralRewarder for RecordingRewarder {
    async fn reward_referrer(&self, referrer_id: &UserId, referred_full_name: &str) -> AuthResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((*referrer_id, referred_full_name.to_string()));
        Ok(())
    }
}

struct Fixture {
    users: Arc<MemoryUsers>,
    rewarder: Arc<RecordingRewarder>,
    config: Arc<AuthConfig>,
}

impl Fixture {
    fn new() -> Self {
        let config = AuthConfig::with_random_secret().with_admin_emails(["boss@example.com"]);
        Self {
            users: Arc::new(MemoryUsers::default()),
            rewarder: Arc::new(RecordingRewarder::default()),
            config: Arc::new(config),
        }
    }

    async fn sign_up(&self, email: &str, referral_code: Option<&str>) -> AuthResult<(String, User)> {
        let use_case =
            SignUpUseCase::new(self.users.clone(), self.rewarder.clone(), self.config.clone());
        let output = use_case
            .execute(SignUpInput {
                email: email.to_string(),
                password: "Ledger-Entry-42".to_string(),
                full_name: format!("Owner of {}", email),
                referral_code: referral_code.map(str::to_string),
            })
            .await?;
        Ok((output.token, output.user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<(String, User)> {
        let use_case = SignInUseCase::new(self.users.clone(), self.config.clone());
        let output = use_case
            .execute(SignInInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        Ok((output.token, output.user))
    }

    fn router(&self) -> Router {
        let guard = AuthMiddlewareState {
            repo: self.users.clone(),
            config: self.config.clone(),
        };
        let admin_only = Router::new()
            .route("/admin/ping", get(|| async { "pong" }))
            .route_layer(from_fn(require_admin))
            .route_layer(from_fn_with_state(guard, require_user::<MemoryUsers>));

        auth_router(self.users.clone(), self.rewarder.clone(), self.config.clone()).merge(admin_only)
    }
}

// ============================================================================
// Sign up
// ============================================================================

#[tokio::test]
async fn test_sign_up_starts_with_empty_wallet() {
    let fx = Fixture::new();
    let (token, user) = fx.sign_up("new@example.com", None).await.unwrap();

    assert_eq!(user.wallet_balance.minor(), 0);
    assert_eq!(user.total_earned.minor(), 0);
    assert_eq!(user.ads_watched, 0);
    assert!(user.referred_by.is_none());
    assert!(!user.is_admin);
    assert_eq!(user.referral_code.as_str().len(), 8);

    let claims = TokenService::new(&fx.config).verify(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.user_id);
    assert_eq!(claims.email, "new@example.com");
}

#[tokio::test]
async fn test_sign_up_rejects_taken_email_case_insensitively() {
    let fx = Fixture::new();
    fx.sign_up("dup@example.com", None).await.unwrap();

    let err = fx.sign_up("DUP@Example.com", None).await.unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
    assert_eq!(fx.users.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sign_up_validates_before_touching_storage() {
    let fx = Fixture::new();
    let use_case = SignUpUseCase::new(fx.users.clone(), fx.rewarder.clone(), fx.config.clone());

    let err = use_case
        .execute(SignUpInput {
            email: "weak@example.com".into(),
            password: "password".into(),
            full_name: "Weak".into(),
            referral_code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::PasswordValidation(_)));

    let err = use_case
        .execute(SignUpInput {
            email: "not-an-email".into(),
            password: "Ledger-Entry-42".into(),
            full_name: "Nobody".into(),
            referral_code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert!(fx.users.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_referral_code_rewards_referrer_once() {
    let fx = Fixture::new();
    let (_, referrer) = fx.sign_up("a@example.com", None).await.unwrap();

    let code = referrer.referral_code.as_str().to_lowercase();
    let (_, referred) = fx.sign_up("b@example.com", Some(&code)).await.unwrap();

    assert_eq!(referred.referred_by, Some(referrer.user_id));
    assert_eq!(referred.wallet_balance.minor(), 0);

    let calls = fx.rewarder.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, referrer.user_id);
    assert_eq!(calls[0].1, "Owner of b@example.com");
}

#[tokio::test]
async fn test_referral_code_collision_regenerates_code() {
    let fx = Fixture::new();
    let (_, referrer) = fx.sign_up("c@example.com", None).await.unwrap();
    *fx.users.code_collisions.lock().unwrap() = 2;

    let (_, user) = fx
        .sign_up("d@example.com", Some(referrer.referral_code.as_str()))
        .await
        .unwrap();

    let stored = fx.users.find(|u| u.user_id == user.user_id).unwrap();
    assert_eq!(stored.referral_code, user.referral_code);
    assert_eq!(fx.rewarder.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_referral_code_collisions_give_up() {
    let fx = Fixture::new();
    *fx.users.code_collisions.lock().unwrap() = 3;

    let err = fx.sign_up("e@example.com", None).await.unwrap_err();
    assert!(matches!(err, AuthError::ReferralCodeTaken));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(fx.users.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_referral_code_is_ignored() {
    let fx = Fixture::new();
    for code in ["ZZZZZZZZ", "bad", "   "] {
        let email = format!("{}@example.com", code.trim().len());
        let (_, user) = fx.sign_up(&email, Some(code)).await.unwrap();
        assert!(user.referred_by.is_none());
    }
    assert!(fx.rewarder.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_email_is_granted_admin() {
    let fx = Fixture::new();
    let (_, admin) = fx.sign_up("Boss@Example.com", None).await.unwrap();
    assert!(admin.is_admin);
}

// ============================================================================
// Sign in / current user
// ============================================================================

#[tokio::test]
async fn test_sign_in() {
    let fx = Fixture::new();
    let (_, user) = fx.sign_up("login@example.com", None).await.unwrap();

    let (token, signed_in) = fx.sign_in("LOGIN@example.com", "Ledger-Entry-42").await.unwrap();
    assert_eq!(signed_in.user_id, user.user_id);

    let current = CurrentUserUseCase::new(fx.users.clone(), fx.config.clone())
        .execute(&token)
        .await
        .unwrap();
    assert_eq!(current.user_id, user.user_id);
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let fx = Fixture::new();
    fx.sign_up("login@example.com", None).await.unwrap();

    for (email, password) in [
        ("login@example.com", "Wrong-Password-1"),
        ("nobody@example.com", "Ledger-Entry-42"),
        ("garbage", "Ledger-Entry-42"),
    ] {
        let err = fx.sign_in(email, password).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials), "{email}");
    }
}

#[tokio::test]
async fn test_token_for_missing_user_is_rejected() {
    let fx = Fixture::new();
    let (token, user) = fx.sign_up("gone@example.com", None).await.unwrap();
    fx.users.remove(&user.user_id);

    let err = CurrentUserUseCase::new(fx.users.clone(), fx.config.clone())
        .execute(&token)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid));
}

// ============================================================================
// Router
// ============================================================================

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_signup_route_returns_token_and_profile() {
    let fx = Fixture::new();
    let request = Request::builder()
        .method("POST")
        .uri("/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "email": "route@example.com",
                "password": "Ledger-Entry-42",
                "full_name": "Route User"
            })
            .to_string(),
        ))
        .unwrap();

    let response = fx.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "route@example.com");
    assert_eq!(body["user"]["full_name"], "Route User");
    assert_eq!(body["user"]["wallet_balance"], 0.0);
    assert_eq!(body["user"]["is_admin"], false);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_signup_route_is_400() {
    let fx = Fixture::new();
    fx.sign_up("taken@example.com", None).await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "email": "taken@example.com",
                "password": "Ledger-Entry-42",
                "full_name": "Again"
            })
            .to_string(),
        ))
        .unwrap();

    let response = fx.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Email already registered");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let fx = Fixture::new();
    let (token, _) = fx.sign_up("me@example.com", None).await.unwrap();

    let response = fx.router().oneshot(get_with_token("/auth/me", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = fx
        .router()
        .oneshot(get_with_token("/auth/me", Some("forged.token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = fx
        .router()
        .oneshot(get_with_token("/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "me@example.com");
}

#[tokio::test]
async fn test_admin_guard() {
    let fx = Fixture::new();
    let (user_token, _) = fx.sign_up("user@example.com", None).await.unwrap();
    let (admin_token, _) = fx.sign_up("boss@example.com", None).await.unwrap();

    let response = fx
        .router()
        .oneshot(get_with_token("/admin/ping", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = fx
        .router()
        .oneshot(get_with_token("/admin/ping", Some(&user_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = fx
        .router()
        .oneshot(get_with_token("/admin/ping", Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
