// src/handlers/admin.rs

use axum::{Json, extract::State, response::IntoResponse};
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    config::{ACTIVITY_WINDOW_DAYS, Config, RECENT_USERS_DAYS},
    error::AppError,
    models::{
        admin::{
            Activity, ActivityRow, AdminUserRow, AnalyticsResponse, Overview, PagePagination,
            QuizStats, QuizTypeRow, ResetPasswordRequest, RoleChangeResult, TopPerformer,
            UpdateRoleRequest, UserListParams, UserListResponse,
        },
        user::Role,
    },
    services::analytics::{
        contains_pattern, daily_activity, page_count, page_offset, quiz_type_stats,
    },
    utils::{
        crypto::{hash_password, keys_match},
        extract::{AppJson, AppPath, AppQuery},
    },
};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;
const TOP_PERFORMERS: i64 = 5;
const RECENT_ACTIVITY: usize = 20;
const MIN_RESET_PASSWORD_LEN: usize = 6;

async fn overview(pool: &PgPool) -> Result<Overview, AppError> {
    let since = Utc::now() - Duration::days(RECENT_USERS_DAYS);

    let (total_users, total_quiz_results, total_achievements, recent_users) =
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users),
                (SELECT COUNT(*) FROM quiz_results),
                (SELECT COUNT(*) FROM user_achievements),
                (SELECT COUNT(*) FROM users WHERE created_at >= $1)
            "#,
        )
        .bind(since)
        .fetch_one(pool)
        .await?;

    Ok(Overview {
        total_users,
        total_quiz_results,
        total_achievements,
        recent_users,
    })
}

async fn quiz_stats(pool: &PgPool) -> Result<QuizStats, AppError> {
    let rows = sqlx::query_as::<_, QuizTypeRow>(
        r#"
        SELECT quiz_type, COUNT(*) AS count, AVG(score)::FLOAT8 AS average_score
        FROM quiz_results
        GROUP BY quiz_type
        ORDER BY quiz_type
        "#,
    )
    .fetch_all(pool)
    .await?;

    let (by_type, average_scores) = quiz_type_stats(rows);
    Ok(QuizStats {
        by_type,
        average_scores,
    })
}

async fn top_performers(pool: &PgPool) -> Result<Vec<TopPerformer>, AppError> {
    let rows = sqlx::query_as::<_, TopPerformer>(
        r#"
        SELECT
            u.id, u.name, u.email, u.total_points,
            (SELECT COUNT(*) FROM quiz_results q WHERE q.user_id = u.id) AS quiz_results_count,
            (SELECT COUNT(*) FROM user_achievements a WHERE a.user_id = u.id) AS achievements_count
        FROM users u
        WHERE u.role = $1
        ORDER BY u.total_points DESC, u.id
        LIMIT $2
        "#,
    )
    .bind(Role::User.as_str())
    .bind(TOP_PERFORMERS)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

async fn activity(pool: &PgPool) -> Result<Activity, AppError> {
    let since = Utc::now() - Duration::days(ACTIVITY_WINDOW_DAYS);

    let rows = sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT created_at, quiz_type, score
        FROM quiz_results
        WHERE created_at >= $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    let daily = daily_activity(&rows);
    let recent = rows.into_iter().take(RECENT_ACTIVITY).collect();

    Ok(Activity { daily, recent })
}

/// Platform-wide counters for the admin dashboard.
/// Admin only.
pub async fn analytics(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let (overview, quiz_stats, top_performers, activity) = tokio::try_join!(
        overview(&pool),
        quiz_stats(&pool),
        top_performers(&pool),
        activity(&pool),
    )?;

    Ok(Json(AnalyticsResponse {
        overview,
        quiz_stats,
        top_performers,
        activity,
    }))
}

/// Lists users, newest first, with optional search on name or email.
/// Admin only.
pub async fn list_users(
    State(pool): State<PgPool>,
    AppQuery(params): AppQuery<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = page_offset(page, limit)
        .ok_or(AppError::BadRequest("page is out of range".to_string()))?;
    let pattern = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(contains_pattern);

    let users = sqlx::query_as::<_, AdminUserRow>(
        r#"
        SELECT
            u.id, u.name, u.email, u.role, u.total_points, u.current_streak,
            u.last_active, u.created_at,
            (SELECT COUNT(*) FROM quiz_results q WHERE q.user_id = u.id) AS quiz_results_count,
            (SELECT COUNT(*) FROM user_achievements a WHERE a.user_id = u.id) AS achievements_count
        FROM users u
        WHERE $1::TEXT IS NULL OR u.name ILIKE $1 ESCAPE '\' OR u.email ILIKE $1 ESCAPE '\'
        ORDER BY u.created_at DESC, u.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list users: {:?}", e);
        AppError::from(e)
    })?;

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users u
        WHERE $1::TEXT IS NULL OR u.name ILIKE $1 ESCAPE '\' OR u.email ILIKE $1 ESCAPE '\'
        "#,
    )
    .bind(&pattern)
    .fetch_one(&pool)
    .await?;

    Ok(Json(UserListResponse {
        users,
        pagination: PagePagination {
            page,
            limit,
            total,
            pages: page_count(total, limit),
        },
    }))
}

/// Changes a user's role. The new role applies on that user's next request.
/// Admin only.
pub async fn update_role(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = payload
        .user_id
        .ok_or(AppError::BadRequest("Invalid user ID or role".to_string()))?;
    let role: Role = payload
        .role
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid user ID or role".to_string()))?;

    let user = sqlx::query_as::<_, RoleChangeResult>(
        r#"
        UPDATE users SET role = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, name, email, role
        "#,
    )
    .bind(role.as_str())
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id, role = %role, "User role changed");

    Ok(Json(json!({ "success": true, "user": user })))
}

/// Deletes a user and, by cascade, their results, progress and achievements.
/// Admin only. Admin accounts cannot be deleted.
pub async fn delete_user(
    State(pool): State<PgPool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    if role == Role::Admin.as_str() {
        return Err(AppError::Forbidden("Cannot delete admin users".to_string()));
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete user: {:?}", e);
            AppError::from(e)
        })?;

    tracing::info!(user_id = id, "User deleted by admin");

    Ok(Json(json!({ "success": true, "message": "User deleted successfully" })))
}

/// Recovery path for locked-out operators: sets the password of `email` and
/// makes it an admin, creating the account when missing.
///
/// Requires `admin_key` to equal `ADMIN_RESET_KEY`; disabled when that is unset.
pub async fn reset_password(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    AppJson(payload): AppJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let expected = config
        .admin_reset_key
        .as_deref()
        .ok_or(AppError::Forbidden("Invalid admin key".to_string()))?;
    if !keys_match(&payload.admin_key, expected) {
        tracing::warn!("Admin password reset rejected: bad key");
        return Err(AppError::Forbidden("Invalid admin key".to_string()));
    }

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.new_password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and new password are required".to_string(),
        ));
    }
    if payload.new_password.chars().count() < MIN_RESET_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_RESET_PASSWORD_LEN
        )));
    }

    let hashed = hash_password(&payload.new_password)?;
    let user = sqlx::query_as::<_, RoleChangeResult>(
        r#"
        INSERT INTO users (email, name, password, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET
            password = EXCLUDED.password,
            role = EXCLUDED.role,
            updated_at = NOW()
        RETURNING id, name, email, role
        "#,
    )
    .bind(&email)
    .bind("Admin")
    .bind(&hashed)
    .bind(Role::Admin.as_str())
    .fetch_one(&pool)
    .await?;

    tracing::info!(user_id = user.id, "Admin password reset");

    Ok(Json(json!({
        "success": true,
        "message": "Admin password reset",
        "user": user,
    })))
}
