// src/handlers/achievements.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    services::achievements::{DEFINITIONS, check_and_unlock_achievements, list_unlocked},
    utils::jwt::Claims,
};

/// Achievements the current user has unlocked, newest first.
pub async fn list_achievements(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let achievements = list_unlocked(&pool, claims.user_id()?).await?;
    Ok(Json(json!({ "achievements": achievements })))
}

/// Re-evaluates the rules for the current user.
pub async fn check_achievements(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let unlocked = check_and_unlock_achievements(&pool, claims.user_id()?).await?;
    Ok(Json(json!({
        "success": true,
        "unlocked_achievements": unlocked,
    })))
}

pub async fn catalog() -> impl IntoResponse {
    Json(json!({ "achievements": &*DEFINITIONS }))
}
