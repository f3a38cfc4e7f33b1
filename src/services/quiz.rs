// src/services/quiz.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, types::Json};

use crate::{
    error::AppError,
    models::{
        progress::ProgressStatus,
        quiz_result::{SubmissionOutcome, SubmitQuizRequest},
    },
    services::scoring::{next_streak, passed, points_earned},
};

/// A validated quiz attempt ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttempt {
    pub quiz_type: String,
    pub module_id: Option<String>,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub time_spent: Option<i32>,
    pub answers: serde_json::Value,
}

impl TryFrom<SubmitQuizRequest> for NewAttempt {
    type Error = AppError;

    fn try_from(req: SubmitQuizRequest) -> Result<Self, Self::Error> {
        let quiz_type = req.quiz_type.trim().to_string();
        let (Some(score), Some(total_questions), Some(correct_answers)) =
            (req.score, req.total_questions, req.correct_answers)
        else {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        };
        if quiz_type.is_empty() || total_questions <= 0 {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        }
        if quiz_type.len() > 50 {
            return Err(AppError::BadRequest("quiz_type is too long".to_string()));
        }
        if !(0..=total_questions).contains(&correct_answers) {
            return Err(AppError::BadRequest(
                "correct_answers must be between 0 and total_questions".to_string(),
            ));
        }
        if !(0..=100).contains(&score) {
            return Err(AppError::BadRequest("score must be between 0 and 100".to_string()));
        }
        if req.time_spent.is_some_and(|t| t < 0) {
            return Err(AppError::BadRequest("time_spent cannot be negative".to_string()));
        }

        let module_id = req
            .module_id
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Ok(NewAttempt {
            quiz_type,
            module_id,
            score,
            total_questions,
            correct_answers,
            time_spent: req.time_spent,
            answers: req.answers.unwrap_or_else(|| serde_json::json!([])),
        })
    }
}

/// Module status implied by an attempt's score.
pub fn status_for_score(score: i32) -> ProgressStatus {
    if passed(score) {
        ProgressStatus::Completed
    } else {
        ProgressStatus::InProgress
    }
}

/// Stores an attempt and applies its side effects in one transaction:
/// points and streak on the user, and the module's progress row when the
/// attempt belongs to a module.
pub async fn record_attempt(
    pool: &PgPool,
    user_id: i64,
    attempt: &NewAttempt,
) -> Result<SubmissionOutcome, AppError> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let activity = sqlx::query_as::<_, (Option<DateTime<Utc>>, i32)>(
        "SELECT last_active, current_streak FROM users WHERE id = $1 FOR UPDATE",
    )
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let result_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO quiz_results
            (user_id, quiz_type, module_id, score, total_questions, correct_answers, time_spent, answers, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(&attempt.quiz_type)
    .bind(&attempt.module_id)
    .bind(attempt.score)
    .bind(attempt.total_questions)
    .bind(attempt.correct_answers)
    .bind(attempt.time_spent)
    .bind(Json(&attempt.answers))
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let points = points_earned(attempt.correct_answers, attempt.total_questions);
    let streak = next_streak(activity.0, activity.1, now);

    sqlx::query(
        r#"
        UPDATE users
        SET total_points = total_points + $1,
            current_streak = $2,
            last_active = $3,
            updated_at = $3
        WHERE id = $4
        "#,
    )
    .bind(points)
    .bind(streak)
    .bind(now)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if let Some(module_id) = &attempt.module_id {
        let status = status_for_score(attempt.score);
        let completed_at = (status == ProgressStatus::Completed).then_some(now);
        sqlx::query(
            r#"
            INSERT INTO user_progress (user_id, module_id, status, score, completed_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, module_id) DO UPDATE SET
                status = EXCLUDED.status,
                score = EXCLUDED.score,
                completed_at = EXCLUDED.completed_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .bind(status.as_str())
        .bind(attempt.score)
        .bind(completed_at)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        user_id,
        result_id,
        quiz_type = %attempt.quiz_type,
        score = attempt.score,
        points,
        "Quiz attempt recorded"
    );

    Ok(SubmissionOutcome {
        id: result_id,
        score: attempt.score,
        points_earned: points,
        passed: passed(attempt.score),
    })
}
