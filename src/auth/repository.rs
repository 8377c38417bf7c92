// Credential and refresh-token stores

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{NewRefreshToken, NewUser, RefreshToken, User},
};

/// Persistence of user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the assigned id
    async fn create(&self, user: NewUser) -> Result<i64, AuthError>;

    /// Find a user by email and password digest
    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AuthError>;
}

/// Persistence of refresh tokens; at most one live token per user
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Store a token, replacing every earlier token of the same user
    async fn create(&self, token: NewRefreshToken) -> Result<(), AuthError>;

    /// Look up a token and delete all tokens of its owner
    ///
    /// Only one of several concurrent callers presenting the same token
    /// gets `Some`.
    async fn take(&self, token: &str) -> Result<Option<RefreshToken>, AuthError>;
}

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, user: NewUser) -> Result<i64, AuthError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (nickname, email, password, registered_at) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.registered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, nickname, email, password AS password_hash, registered_at FROM users WHERE email = $1 AND password = $2",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Token repository for refresh token operations
#[derive(Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    /// Create a new TokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete expired tokens
    pub async fn delete_expired_tokens(&self) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TokenStore for TokenRepository {
    async fn create(&self, token: NewRefreshToken) -> Result<(), AuthError> {
        // One row per user; concurrent issuances serialize on the user_id constraint
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(token.user_id)
        .bind(&token.token)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn take(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        // Single statement so concurrent redemptions cannot both see the row
        let rows = sqlx::query_as::<_, RefreshToken>(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = (SELECT user_id FROM refresh_tokens WHERE token = $1)
            RETURNING id, user_id, token, expires_at
            "#,
        )
        .bind(token)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().find(|row| row.token == token))
    }
}
