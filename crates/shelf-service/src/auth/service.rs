//! Account creation and token issuance.
//!
//! Exactly one refresh token is stored per user. Issuing a new pair
//! replaces the stored row, so a login on one device invalidates the
//! refresh token held by another. Presented refresh tokens must match
//! the stored row byte for byte; anything else is treated as revoked.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use shelf_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordPolicy, TokenPair};
use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_database::repositories::{TokenRepository, UserRepository};
use shelf_entity::user::{NewUser, User};

/// Registration input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterParams {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plain-text password.
    pub password: String,
}

/// Login input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginParams {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// An authenticated user together with a fresh token pair.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The account.
    pub user: User,
    /// Issued tokens.
    pub tokens: TokenPair,
}

/// Handles registration, login, token refresh, and logout.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Refresh token repository.
    tokens: Arc<TokenRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password strength policy.
    policy: Arc<PasswordPolicy>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder.
    decoder: Arc<JwtDecoder>,
    /// Storage quota granted to new accounts, in bytes.
    default_quota_bytes: i64,
}

impl AuthService {
    /// Creates a new auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserRepository>,
        tokens: Arc<TokenRepository>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        default_quota_bytes: i64,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
            policy,
            encoder,
            decoder,
            default_quota_bytes,
        }
    }

    /// Registers a new account and logs it in.
    pub async fn register(&self, params: RegisterParams) -> AppResult<AuthSession> {
        if !params.email.contains('@') || !params.email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        if params.name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        self.policy.validate(&params.password)?;

        let password_hash = self.hasher.hash_password(&params.password)?;
        let data = NewUser {
            email: params.email,
            name: params.name,
            password_hash,
        };
        let (user, quota) = self
            .users
            .create_with_quota(&data, self.default_quota_bytes)
            .await?;

        let tokens = self.issue_pair(&user).await?;

        info!(
            user_id = %user.id,
            storage_limit = quota.storage_limit,
            "User registered"
        );
        Ok(AuthSession { user, tokens })
    }

    /// Authenticates with email and password.
    ///
    /// A missing account and a wrong password produce the same error so
    /// the response does not reveal which emails are registered.
    pub async fn login(&self, params: LoginParams) -> AppResult<AuthSession> {
        let user = self
            .users
            .find_by_email(&params.email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        let valid = self
            .hasher
            .verify_password(&params.password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid email or password"));
        }

        let tokens = self.issue_pair(&user).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession { user, tokens })
    }

    /// Exchanges a valid refresh token for a new token pair.
    ///
    /// Rotation: the presented token is compared against the stored row,
    /// and the new pair replaces it, so each refresh token works once.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user_id = claims.user_id();

        let stored = self
            .tokens
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Refresh token has been revoked"))?;
        if stored.token != refresh_token {
            return Err(AppError::authentication("Refresh token has been revoked"));
        }
        if stored.is_expired() {
            return Err(AppError::authentication("Refresh token expired"));
        }

        let pair = self.encoder.generate_token_pair(user_id, &claims.email)?;
        self.tokens
            .upsert(user_id, &pair.refresh_token, pair.refresh_expires_at)
            .await?;

        info!(user_id = %user_id, "Tokens refreshed");
        Ok(pair)
    }

    /// Revokes the stored refresh token for a user.
    pub async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        self.tokens.delete_for_user(user_id).await?;
        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    async fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        let pair = self.encoder.generate_token_pair(user.id, &user.email)?;
        self.tokens
            .upsert(user.id, &pair.refresh_token, pair.refresh_expires_at)
            .await?;
        Ok(pair)
    }
}
