// Authentication service - business logic layer

use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::audit::{Action, AuditLogger, Entity};
use crate::auth::{
    error::AuthError,
    models::{NewRefreshToken, NewUser, SignInInput, SignUpInput, TokenPair},
    password::PasswordHasher,
    repository::{TokenStore, UserStore},
    token::TokenService,
};

/// Authentication service coordinating all auth operations
pub struct AuthService {
    user_repo: Arc<dyn UserStore>,
    token_repo: Arc<dyn TokenStore>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: TokenService,
    audit: AuditLogger,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        user_repo: Arc<dyn UserStore>,
        token_repo: Arc<dyn TokenStore>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: TokenService,
        audit: AuditLogger,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            password_hasher,
            token_service,
            audit,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Register a new user and return its id
    pub async fn register(&self, input: SignUpInput) -> Result<i64, AuthError> {
        input.validate()?;

        let password_hash = self.password_hasher.hash(&input.password)?;
        let user_id = self
            .user_repo
            .create(NewUser {
                nickname: input.nickname,
                email: input.email,
                password_hash,
                registered_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id, "Registered new user");
        self.audit.log(Action::Register, Entity::User, user_id).await;

        Ok(user_id)
    }

    /// Exchange credentials for a token pair
    pub async fn authenticate(&self, input: SignInInput) -> Result<TokenPair, AuthError> {
        input.validate()?;

        let password_hash = self.password_hasher.hash(&input.password)?;
        let user = self
            .user_repo
            .find_by_credentials(&input.email, &password_hash)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Sign-in with unknown credentials");
                AuthError::UserNotFound
            })?;

        let pair = self.issue_token_pair(user.id).await?;

        tracing::info!(user_id = user.id, "Issued tokens on sign-in");
        self.audit.log(Action::TokenRequest, Entity::User, user.id).await;

        Ok(pair)
    }

    /// Mint an access token and rotate the user's refresh token
    pub async fn issue_token_pair(&self, user_id: i64) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let access_token = self.token_service.generate_access_token_at(user_id, now)?;
        let refresh_token = self.token_service.generate_refresh_token();

        self.token_repo
            .create(NewRefreshToken {
                user_id,
                token: refresh_token.clone(),
                expires_at: self.token_service.refresh_token_expiry(now),
            })
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate a bearer token and return the user id it was issued to
    pub fn validate_access_token(&self, token: &str) -> Result<i64, AuthError> {
        self.token_service.user_id_from_token(token)
    }

    /// Redeem a refresh token for a fresh pair
    pub async fn refresh_token_pair(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let stored = self
            .token_repo
            .take(refresh_token)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        if stored.expires_at < Utc::now() {
            tracing::warn!(user_id = stored.user_id, "Expired refresh token presented");
            return Err(AuthError::RefreshTokenExpired);
        }

        let pair = self.issue_token_pair(stored.user_id).await?;

        tracing::info!(user_id = stored.user_id, "Rotated refresh token");
        self.audit
            .log(Action::RefreshToken, Entity::User, stored.user_id)
            .await;

        Ok(pair)
    }
}
