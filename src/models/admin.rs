// src/models/admin.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Query parameters for the admin user listing.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// User row as shown in the admin table, with relation counts.
#[derive(Debug, Serialize, FromRow)]
pub struct AdminUserRow {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub role: String,
    pub total_points: i32,
    pub current_streak: i32,
    pub last_active: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub quiz_results_count: i64,
    pub achievements_count: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PagePagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<AdminUserRow>,
    pub pagination: PagePagination,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub user_id: Option<i64>,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RoleChangeResult {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub admin_key: String,
}

#[derive(Debug, Serialize)]
pub struct Overview {
    pub total_users: i64,
    pub total_quiz_results: i64,
    pub total_achievements: i64,
    pub recent_users: i64,
}

#[derive(Debug, FromRow)]
pub struct QuizTypeRow {
    pub quiz_type: String,
    pub count: i64,
    pub average_score: Option<f64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct QuizTypeStat {
    #[serde(rename = "type")]
    pub quiz_type: String,
    pub count: i64,
    pub average_score: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizStats {
    pub by_type: Vec<QuizTypeStat>,
    pub average_scores: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct TopPerformer {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub total_points: i32,
    pub quiz_results_count: i64,
    pub achievements_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActivityRow {
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub quiz_type: String,
    pub score: i32,
}

#[derive(Debug, Serialize)]
pub struct Activity {
    /// `YYYY-MM-DD` → number of attempts that day.
    pub daily: BTreeMap<String, i64>,
    pub recent: Vec<ActivityRow>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub overview: Overview,
    pub quiz_stats: QuizStats,
    pub top_performers: Vec<TopPerformer>,
    pub activity: Activity,
}
