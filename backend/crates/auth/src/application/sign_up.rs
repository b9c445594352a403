//! Sign Up Use Case
//!
//! Creates a new user account, paying the referrer when a valid referral
//! code is supplied.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::{ReferralRewarder, UserRepository};
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    referral_code::ReferralCode,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Fresh referral codes tried before giving up on an insert
const REFERRAL_CODE_ATTEMPTS: usize = 3;

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub referral_code: Option<String>,
}

/// Token plus the profile it was issued for (signup and login)
#[derive(Debug)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
}

pub struct SignUpUseCase<U, B>
where
    U: UserRepository,
    B: ReferralRewarder,
{
    user_repo: Arc<U>,
    rewarder: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<U, B> SignUpUseCase<U, B>
where
    U: UserRepository,
    B: ReferralRewarder,
{
    pub fn new(user_repo: Arc<U>, rewarder: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            rewarder,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<AuthOutput> {
        let email = Email::new(&input.email)?;
        let full_name = FullName::new(&input.full_name)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let referrer = self.resolve_referrer(input.referral_code.as_deref()).await?;
        let is_admin = self.config.is_admin_email(&email);

        let mut user = User::new(
            email,
            password_hash,
            full_name,
            referrer.as_ref().map(|r| r.user_id),
            is_admin,
        );

        // The bonus is paid before the new row exists; a failed insert
        // after this point leaves the bonus in place.
        if let Some(referrer) = &referrer {
            self.rewarder
                .reward_referrer(&referrer.user_id, user.full_name.as_str())
                .await?;
        }

        self.insert(&mut user).await?;

        tracing::info!(
            user_id = %user.user_id,
            referred_by = ?user.referred_by.map(|id| id.to_string()),
            is_admin = user.is_admin,
            "User signed up"
        );

        let token = TokenService::new(&self.config).issue(&user.user_id, &user.email, Utc::now())?;

        Ok(AuthOutput { token, user })
    }

    async fn insert(&self, user: &mut User) -> AuthResult<()> {
        let mut attempt = 1;
        loop {
            match self.user_repo.create(user).await {
                Err(AuthError::ReferralCodeTaken) if attempt < REFERRAL_CODE_ATTEMPTS => {
                    tracing::warn!(
                        user_id = %user.user_id,
                        attempt,
                        "Referral code collision, generating another"
                    );
                    user.referral_code = ReferralCode::generate();
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Unknown or malformed codes are ignored, never rejected.
    async fn resolve_referrer(&self, code: Option<&str>) -> AuthResult<Option<User>> {
        let Some(raw) = code.filter(|c| !c.trim().is_empty()) else {
            return Ok(None);
        };

        let referrer = match ReferralCode::parse(raw) {
            Some(code) => self.user_repo.find_by_referral_code(&code).await?,
            None => None,
        };

        if referrer.is_none() {
            tracing::info!(referral_code = %raw.trim(), "Ignoring unknown referral code");
        }

        Ok(referrer)
    }
}
