// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    models::{SignInInput, SignUpInput, SignUpResponse, TokenPair, TokenResponse},
    service::AuthService,
};

/// Name of the cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";

fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .http_only(true)
        .path("/auth")
        .build()
}

fn token_response(jar: CookieJar, pair: TokenPair) -> (CookieJar, Json<TokenResponse>) {
    let jar = jar.add(refresh_cookie(pair.refresh_token));
    (jar, Json(TokenResponse { token: pair.access_token }))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    request_body = SignUpInput,
    responses(
        (status = 201, description = "User registered", body = SignUpResponse),
        (status = 400, description = "Invalid input data"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn sign_up_handler(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<SignUpInput>,
) -> Result<(StatusCode, Json<SignUpResponse>), AuthError> {
    let id = service.register(request).await?;
    Ok((StatusCode::CREATED, Json(SignUpResponse { id })))
}

/// Sign in; the access token is returned in the body, the refresh token as an HttpOnly cookie
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInInput,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn sign_in_handler(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    Json(request): Json<SignInInput>,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let pair = service.authenticate(request).await?;
    Ok(token_response(jar, pair))
}

/// Exchange the refresh-token cookie for a new pair
#[utoipa::path(
    get,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenResponse),
        (status = 400, description = "Missing refresh-token cookie"),
        (status = 401, description = "Unknown or expired refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn refresh_handler(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenResponse>), AuthError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AuthError::ValidationError("Missing refresh-token cookie".to_string()))?;

    let pair = service.refresh_token_pair(&refresh_token).await?;
    Ok(token_response(jar, pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_is_http_only() {
        let cookie = refresh_cookie("abc".to_string());
        assert_eq!(cookie.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/auth"));
    }
}
