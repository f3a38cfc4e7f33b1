// src/models/progress.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::{achievement::UnlockedAchievement, quiz_result::QuizResultSummary};

/// Represents the 'user_progress' table, keyed by (user_id, module_id).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: i64,
    pub module_id: String,
    /// 'locked', 'in-progress' or 'completed'.
    pub status: String,
    pub score: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStatus {
    Locked,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Locked => "locked",
            ProgressStatus::InProgress => "in-progress",
            ProgressStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "locked" => Ok(ProgressStatus::Locked),
            "in-progress" => Ok(ProgressStatus::InProgress),
            "completed" => Ok(ProgressStatus::Completed),
            other => Err(format!("Invalid status '{other}'")),
        }
    }
}

/// DTO for updating progress on a module.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "module_id is required"))]
    pub module_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    #[validate(range(min = 0, max = 100))]
    pub score: Option<i32>,
}

/// Progress row enriched with catalog data for the dashboard.
#[derive(Debug, Serialize)]
pub struct ModuleProgressView {
    #[serde(flatten)]
    pub progress: UserProgress,
    pub title: Option<&'static str>,
    pub path_id: Option<&'static str>,
}

/// Aggregate over quiz results for a single module.
#[derive(Debug, FromRow)]
pub struct ModuleStatsRow {
    pub module_id: Option<String>,
    pub average_score: Option<f64>,
    pub attempts: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ModuleStats {
    pub module_id: String,
    pub average_score: i64,
    pub attempts_count: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OverallStats {
    pub average_score: i64,
    pub total_quizzes: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ProgressCounts {
    pub overall: i64,
    pub completed: usize,
    pub in_progress: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ProgressSection {
    pub modules: Vec<ModuleProgressView>,
    #[serde(flatten)]
    pub counts: ProgressCounts,
}

#[derive(Debug, Serialize)]
pub struct ProgressUser {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub total_points: i32,
    pub current_streak: i32,
    pub last_active: Option<DateTime<Utc>>,
}

/// Full dashboard payload for the current user.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub user: ProgressUser,
    pub recent_quizzes: Vec<QuizResultSummary>,
    pub achievements: Vec<UnlockedAchievement>,
    pub module_progress: Vec<ModuleStats>,
    pub overall_stats: OverallStats,
    pub progress: ProgressSection,
}
