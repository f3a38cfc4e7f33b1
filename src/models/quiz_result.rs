// src/models/quiz_result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

/// Represents the 'quiz_results' table in the database.
/// One row per finished quiz attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub quiz_type: String,
    pub module_id: Option<String>,

    /// Percentage score, 0..=100.
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,

    /// Seconds spent on the attempt, when the client reported it.
    pub time_spent: Option<i32>,

    /// Raw per-question answers as submitted by the client.
    pub answers: Json<serde_json::Value>,

    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Compact attempt row for the dashboard; omits the answers payload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizResultSummary {
    pub id: i64,
    pub quiz_type: String,
    pub module_id: Option<String>,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub time_spent: Option<i32>,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// DTO for submitting a finished quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub quiz_type: String,
    pub module_id: Option<String>,
    pub score: Option<i32>,
    pub total_questions: Option<i32>,
    pub correct_answers: Option<i32>,
    pub time_spent: Option<i32>,
    pub answers: Option<serde_json::Value>,
}

/// Query parameters for the result history.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub quiz_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ResultStats {
    pub average_score: i64,
    pub best_score: i32,
    pub total_attempts: i64,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<QuizResult>,
    pub pagination: Pagination,
    pub stats: ResultStats,
}

/// Outcome of a recorded attempt as returned to the client.
#[derive(Debug, Serialize)]
pub struct SubmissionOutcome {
    pub id: i64,
    pub score: i32,
    pub points_earned: i32,
    pub passed: bool,
}
