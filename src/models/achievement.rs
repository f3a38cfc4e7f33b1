// src/models/achievement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

/// Represents the 'achievements' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    /// Unique display name; also the upsert key.
    pub name: String,
    pub description: String,
    pub icon: String,
    pub points: i32,
    pub category: String,
    pub condition: Json<AchievementCondition>,
}

/// An achievement joined with the moment a user unlocked it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub points: i32,
    pub category: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Rule that decides when an achievement unlocks.
/// Stored as JSON in `achievements.condition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementCondition {
    /// At least `value` quizzes completed.
    QuizCount { value: i64 },
    /// Any single attempt scored at least `value`.
    PerfectScore { value: i32 },
    /// Average over all attempts is at least `value`.
    AverageScore { value: i32 },
    /// An attempt of `quiz_type` scored at least `value`.
    QuizPerfect { quiz_type: String, value: i32 },
}

/// Static description of an achievement the service knows how to award.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub points: i32,
    pub category: &'static str,
    pub condition: AchievementCondition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_json_shape() {
        let c = AchievementCondition::QuizPerfect {
            quiz_type: "phishing".into(),
            value: 100,
        };
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "quiz_perfect");
        assert_eq!(json["quiz_type"], "phishing");
        assert_eq!(json["value"], 100);

        let parsed: AchievementCondition =
            serde_json::from_str(r#"{"type":"quiz_count","value":5}"#).unwrap();
        assert_eq!(parsed, AchievementCondition::QuizCount { value: 5 });
    }
}
