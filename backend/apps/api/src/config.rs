//! Server Configuration
//!
//! Read once from the environment (after `.env` is loaded) and split into
//! the per-crate config structs.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use wallet::WalletConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub cors_origins: CorsOrigins,
    pub auth: AuthConfig,
    pub wallet: WalletConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_random_secret` lets debug builds start without `TOKEN_SECRET`.
    pub fn from_lookup<F>(lookup: F, allow_random_secret: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address")?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let token_ttl_secs = match var("TOKEN_TTL_SECS") {
            Some(raw) => raw
                .parse()
                .context("TOKEN_TTL_SECS must be a positive integer")?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let mut auth = match var("TOKEN_SECRET") {
            Some(encoded) => AuthConfig {
                token_secret: decode_secret(&encoded)?,
                ..AuthConfig::default()
            },
            None if allow_random_secret => {
                tracing::warn!("TOKEN_SECRET not set, using a random secret");
                AuthConfig::with_random_secret()
            }
            None => bail!("TOKEN_SECRET must be set in release builds"),
        };
        auth.token_ttl = Duration::from_secs(token_ttl_secs);
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);
        let auth = match var("ADMIN_EMAILS") {
            Some(list) => auth.with_admin_emails(list.split(',')),
            None => auth,
        };

        let cors_origins = match var("CORS_ORIGINS") {
            None => CorsOrigins::Any,
            Some(list) if list == "*" => CorsOrigins::Any,
            Some(list) => CorsOrigins::List(
                list.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            cors_origins,
            auth,
            wallet: WalletConfig::default(),
        })
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .context("TOKEN_SECRET must be base64")?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to 32 bytes, got {}", bytes.len()))
}
