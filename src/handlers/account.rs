// src/handlers/account.rs

use axum::{Extension, Json, extract::State, http::header, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{ChangePasswordRequest, DELETE_CONFIRMATION, DeleteAccountRequest, Role},
    utils::{
        crypto::{hash_password, verify_password},
        extract::AppJson,
        jwt::{Claims, clear_session_cookie},
    },
};

#[derive(sqlx::FromRow)]
struct Credentials {
    password: String,
    role: String,
}

async fn load_credentials(pool: &PgPool, user_id: i64) -> Result<Credentials, AppError> {
    sqlx::query_as::<_, Credentials>("SELECT password, role FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))
}

/// Changes the current user's password after checking the old one.
pub async fn change_password(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let user_id = claims.user_id()?;

    let credentials = load_credentials(&pool, user_id).await?;
    if !verify_password(&payload.current_password, &credentials.password)? {
        return Err(AppError::BadRequest("Current password is incorrect".to_string()));
    }

    let hashed = hash_password(&payload.new_password)?;
    sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
        .bind(hashed)
        .bind(user_id)
        .execute(&pool)
        .await?;

    tracing::info!(user_id, "Password changed");

    Ok(Json(json!({ "message": "Password changed successfully" })))
}

/// Deletes the current user's account and, by cascade, all their records.
/// Admin accounts cannot delete themselves.
pub async fn delete_account(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<DeleteAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.password.is_empty() || payload.confirmation != DELETE_CONFIRMATION {
        return Err(AppError::BadRequest(
            "Password and confirmation required".to_string(),
        ));
    }

    let user_id = claims.user_id()?;
    let credentials = load_credentials(&pool, user_id).await?;

    if credentials.role == Role::Admin.as_str() {
        return Err(AppError::Forbidden(
            "Admin accounts cannot be self-deleted".to_string(),
        ));
    }

    if !verify_password(&payload.password, &credentials.password)? {
        return Err(AppError::BadRequest("Password is incorrect".to_string()));
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await?;

    tracing::info!(user_id, "Account deleted by owner");

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "message": "Account deleted successfully" })),
    ))
}
