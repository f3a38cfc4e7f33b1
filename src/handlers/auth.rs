// src/handlers/auth.rs

use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, is_unique_violation},
    models::user::{LoginRequest, RegisterRequest, User, default_name},
    utils::{
        crypto::{hash_password, verify_password},
        extract::AppJson,
        jwt::{Claims, clear_session_cookie, session_cookie, sign_jwt},
        sanitize::clean_display_name,
    },
};

pub const USER_COLUMNS: &str = "id, email, name, password, role, total_points, \
     current_streak, last_active, created_at, updated_at";

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let email = payload.email.trim().to_lowercase();
    let name = payload
        .name
        .as_deref()
        .map(clean_display_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| default_name(&email));

    let hashed_password = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, name, password) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
    ))
    .bind(&email)
    .bind(&name)
    .bind(&hashed_password)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(format!("Email '{}' is already registered", email))
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and starts a session.
///
/// Returns the signed token in the body and sets it as the session cookie.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let email = payload.email.trim().to_lowercase();

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(&email)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    let user = user.ok_or(AppError::AuthError("Invalid email or password".to_string()))?;

    if !verify_password(&payload.password, &user.password)? {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    let token = sign_jwt(user.id, &user.role, &config.jwt_secret, config.jwt_expiration)?;
    let cookie = session_cookie(&token, config.jwt_expiration)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({
            "token": token,
            "type": "Bearer",
            "expires_in": config.jwt_expiration,
            "user": user,
        })),
    ))
}

/// Ends the cookie session. Bearer tokens simply expire.
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "message": "Logged out" })),
    )
}

/// Returns the signed-in user as currently stored.
pub async fn session(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::AuthError("Session user no longer exists".to_string()))?;

    Ok(Json(user))
}
