// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

/// User to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

/// Refresh token database model
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Refresh token to be inserted
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Sign-up request DTO
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpInput {
    #[validate(length(min = 2, max = 100))]
    #[schema(example = "ann")]
    pub nickname: String,
    #[validate(email, length(max = 255))]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(min = 6))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Sign-in request DTO
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInInput {
    #[validate(email)]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(min = 6))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Access/refresh pair produced by sign-in and refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign-up response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignUpResponse {
    #[schema(example = 1)]
    pub id: i64,
}

/// Sign-in/refresh response body; the refresh token travels as a cookie
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
