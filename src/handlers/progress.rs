// src/handlers/progress.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        progress::{
            ModuleStatsRow, OverallStats, ProgressResponse, ProgressSection, ProgressStatus,
            ProgressUser, UpdateProgressRequest, UserProgress,
        },
        quiz_result::QuizResultSummary,
        user::User,
    },
    handlers::auth::USER_COLUMNS,
    services::{
        achievements::list_unlocked,
        progress::{module_stats, summarize, with_catalog},
        scoring::round_average,
    },
    utils::{extract::AppJson, jwt::Claims},
};

/// Dashboard data for the current user: points, recent attempts,
/// achievements, per-module stats and module progress.
pub async fn get_progress(
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
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let modules = sqlx::query_as::<_, UserProgress>(
        r#"
        SELECT user_id, module_id, status, score, completed_at, updated_at
        FROM user_progress
        WHERE user_id = $1
        ORDER BY module_id
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    let recent_quizzes = sqlx::query_as::<_, QuizResultSummary>(
        r#"
        SELECT id, quiz_type, module_id, score, total_questions, correct_answers, time_spent, created_at
        FROM quiz_results
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 5
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    let achievements = list_unlocked(&pool, user_id).await?;

    let per_module = sqlx::query_as::<_, ModuleStatsRow>(
        r#"
        SELECT module_id, AVG(score)::FLOAT8 AS average_score, COUNT(*) AS attempts
        FROM quiz_results
        WHERE user_id = $1
        GROUP BY module_id
        ORDER BY module_id NULLS LAST
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    let (total_quizzes, average) = sqlx::query_as::<_, (i64, Option<f64>)>(
        "SELECT COUNT(*), AVG(score)::FLOAT8 FROM quiz_results WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await?;

    let counts = summarize(&modules);

    Ok(Json(ProgressResponse {
        user: ProgressUser {
            id: user.id,
            name: user.name,
            email: user.email,
            total_points: user.total_points,
            current_streak: user.current_streak,
            last_active: user.last_active,
        },
        recent_quizzes,
        achievements,
        module_progress: module_stats(per_module),
        overall_stats: OverallStats {
            average_score: round_average(average),
            total_quizzes,
        },
        progress: ProgressSection {
            modules: with_catalog(modules),
            counts,
        },
    }))
}

/// Sets the status of a module for the current user (upsert).
pub async fn update_progress(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    AppJson(mut payload): AppJson<UpdateProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    payload.module_id = payload.module_id.trim().to_string();
    payload.validate()?;

    let status: ProgressStatus = payload.status.parse().map_err(AppError::BadRequest)?;
    let now = Utc::now();
    let completed_at = (status == ProgressStatus::Completed).then_some(now);

    let progress = sqlx::query_as::<_, UserProgress>(
        r#"
        INSERT INTO user_progress (user_id, module_id, status, score, completed_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, module_id) DO UPDATE SET
            status = EXCLUDED.status,
            score = EXCLUDED.score,
            completed_at = EXCLUDED.completed_at,
            updated_at = EXCLUDED.updated_at
        RETURNING user_id, module_id, status, score, completed_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&payload.module_id)
    .bind(status.as_str())
    .bind(payload.score)
    .bind(completed_at)
    .bind(now)
    .fetch_one(&pool)
    .await?;

    let view = with_catalog(vec![progress]);

    Ok(Json(json!({
        "success": true,
        "progress": view.first(),
    })))
}
