//! Wallet Router

use std::sync::Arc;

use auth::{AuthMiddlewareState, UserRepository, require_admin, require_user};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};

use crate::application::config::WalletConfig;
use crate::domain::repository::WalletStore;
use crate::presentation::handlers::{self, WalletAppState};

/// User routes (`/ads`, `/wallet`, `/withdrawals`) and admin routes
/// (`/admin/...`). All of them require a bearer token.
pub fn wallet_router<R, U>(
    repo: Arc<R>,
    config: Arc<WalletConfig>,
    guard: AuthMiddlewareState<U>,
) -> Router
where
    R: WalletStore,
    U: UserRepository + Send + Sync + 'static,
{
    let state = WalletAppState { repo, config };

    let user = Router::new()
        .route("/ads/watch", post(handlers::watch_ad::<R>))
        .route("/wallet/balance", get(handlers::balance::<R>))
        .route("/wallet/transactions", get(handlers::transactions::<R>))
        .route("/withdrawals/request", post(handlers::request_withdrawal::<R>))
        .route("/withdrawals/my-requests", get(handlers::my_withdrawals::<R>))
        .route_layer(from_fn_with_state(guard.clone(), require_user::<U>))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/admin/withdrawals", get(handlers::admin_list_withdrawals::<R>))
        .route(
            "/admin/withdrawals/{id}",
            put(handlers::admin_update_withdrawal::<R>),
        )
        .route("/admin/stats", get(handlers::admin_stats::<R>))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(guard, require_user::<U>))
        .with_state(state);

    user.merge(admin)
}
