// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    content::quizzes::{QUIZZES, QuizSummary, find_quiz},
    error::AppError,
    models::quiz_result::{
        Pagination, QuizResult, ResultStats, ResultsQuery, ResultsResponse,
        SubmitQuizRequest,
    },
    services::{
        achievements::check_and_unlock_achievements,
        quiz::{NewAttempt, record_attempt},
        scoring::round_average,
    },
    utils::{
        extract::{AppJson, AppPath, AppQuery},
        jwt::Claims,
    },
};

const DEFAULT_RESULTS_LIMIT: i64 = 10;
const MAX_RESULTS_LIMIT: i64 = 100;

/// Records a finished quiz reported by the client.
///
/// * Stores the attempt and credits points (percentage of correct answers).
/// * Updates the module's progress when a `module_id` is given.
/// * Runs the achievement checker and returns anything newly unlocked.
pub async fn submit_quiz(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    AppJson(req): AppJson<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let attempt = NewAttempt::try_from(req)?;

    let outcome = record_attempt(&pool, user_id, &attempt).await?;
    let new_achievements = check_and_unlock_achievements(&pool, user_id).await?;

    Ok(Json(json!({
        "success": true,
        "result": outcome,
        "new_achievements": new_achievements,
    })))
}

/// Paginated attempt history for the current user with aggregate stats.
pub async fn list_results(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    AppQuery(params): AppQuery<ResultsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_RESULTS_LIMIT)
        .clamp(1, MAX_RESULTS_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);
    let quiz_type = params.quiz_type.filter(|t| !t.is_empty());

    let results = sqlx::query_as::<_, QuizResult>(
        r#"
        SELECT id, user_id, quiz_type, module_id, score, total_questions, correct_answers,
               time_spent, answers, created_at
        FROM quiz_results
        WHERE user_id = $1
          AND ($2::TEXT IS NULL OR quiz_type = $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(user_id)
    .bind(&quiz_type)
    .bind(limit)
    .bind(offset)
    .fetch_all(&pool)
    .await?;

    let (total, average, best) = sqlx::query_as::<_, (i64, Option<f64>, Option<i32>)>(
        r#"
        SELECT COUNT(*), AVG(score)::FLOAT8, MAX(score)
        FROM quiz_results
        WHERE user_id = $1
          AND ($2::TEXT IS NULL OR quiz_type = $2)
        "#,
    )
    .bind(user_id)
    .bind(&quiz_type)
    .fetch_one(&pool)
    .await?;

    Ok(Json(ResultsResponse {
        results,
        pagination: Pagination::new(total, limit, offset),
        stats: ResultStats {
            average_score: round_average(average),
            best_score: best.unwrap_or(0),
            total_attempts: total,
        },
    }))
}

/// Lists the quizzes served from the built-in question bank.
pub async fn list_quizzes() -> impl IntoResponse {
    let quizzes: Vec<QuizSummary> = QUIZZES.iter().map(|q| q.summary()).collect();
    Json(quizzes)
}

/// Returns one quiz's questions without answers.
pub async fn get_quiz(AppPath(quiz_type): AppPath<String>) -> Result<impl IntoResponse, AppError> {
    let quiz = find_quiz(&quiz_type).ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(json!({
        "quiz": quiz.summary(),
        "questions": quiz.public_questions(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    /// Question id → selected option index.
    #[serde(default)]
    pub answers: HashMap<i64, usize>,
    pub time_spent: Option<i32>,
}

/// Grades answers server-side and records the attempt like `submit_quiz`.
pub async fn grade_quiz(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    AppPath(quiz_type): AppPath<String>,
    AppJson(req): AppJson<GradeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let quiz = find_quiz(&quiz_type).ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    if req.answers.is_empty() {
        return Err(AppError::BadRequest("No answers submitted".to_string()));
    }

    let report = quiz.grade(&req.answers).map_err(AppError::BadRequest)?;

    let attempt = NewAttempt::try_from(SubmitQuizRequest {
        quiz_type: quiz.quiz_type.to_string(),
        module_id: Some(quiz.module_id.to_string()),
        score: Some(report.score),
        total_questions: Some(report.total_questions as i32),
        correct_answers: Some(report.correct_count as i32),
        time_spent: req.time_spent,
        answers: Some(serde_json::to_value(&req.answers)?),
    })?;

    let outcome = record_attempt(&pool, user_id, &attempt).await?;
    let new_achievements = check_and_unlock_achievements(&pool, user_id).await?;

    Ok(Json(json!({
        "success": true,
        "result": outcome,
        "report": report,
        "new_achievements": new_achievements,
    })))
}
