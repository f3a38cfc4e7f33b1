// src/services/achievements.rs

use std::{collections::HashSet, sync::LazyLock};

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};

use crate::{
    config::MIN_QUIZZES_FOR_AVERAGE,
    error::AppError,
    models::achievement::{
        Achievement, AchievementCondition, AchievementDefinition, UnlockedAchievement,
    },
};

/// Every achievement the service can award.
pub static DEFINITIONS: LazyLock<Vec<AchievementDefinition>> = LazyLock::new(|| {
    vec![
        AchievementDefinition {
            key: "first-quiz",
            name: "First Steps",
            description: "Complete your first quiz",
            icon: "🎯",
            points: 50,
            category: "milestone",
            condition: AchievementCondition::QuizCount { value: 1 },
        },
        AchievementDefinition {
            key: "perfect-score",
            name: "Perfect Score",
            description: "Score 100% on any quiz",
            icon: "💯",
            points: 100,
            category: "performance",
            condition: AchievementCondition::PerfectScore { value: 100 },
        },
        AchievementDefinition {
            key: "quiz-master",
            name: "Quiz Master",
            description: "Complete 5 quizzes",
            icon: "🏆",
            points: 200,
            category: "milestone",
            condition: AchievementCondition::QuizCount { value: 5 },
        },
        AchievementDefinition {
            key: "high-achiever",
            name: "High Achiever",
            description: "Maintain an average score above 80%",
            icon: "⭐",
            points: 150,
            category: "performance",
            condition: AchievementCondition::AverageScore { value: 80 },
        },
        AchievementDefinition {
            key: "phishing-expert",
            name: "Phishing Expert",
            description: "Score 100% on a phishing quiz",
            icon: "🎣",
            points: 125,
            category: "expertise",
            condition: AchievementCondition::QuizPerfect {
                quiz_type: "phishing".to_string(),
                value: 100,
            },
        },
        AchievementDefinition {
            key: "security-specialist",
            name: "Security Specialist",
            description: "Score 100% on a security quiz",
            icon: "🔐",
            points: 125,
            category: "expertise",
            condition: AchievementCondition::QuizPerfect {
                quiz_type: "security".to_string(),
                value: 100,
            },
        },
    ]
});

/// One past attempt, as far as the rules care.
#[derive(Debug, Clone, FromRow)]
pub struct AttemptScore {
    pub quiz_type: String,
    pub score: i32,
}

/// Aggregate view of a user's quiz history.
#[derive(Debug, Default)]
pub struct QuizHistory {
    pub attempts: Vec<AttemptScore>,
    pub average: f64,
}

impl QuizHistory {
    pub fn new(attempts: Vec<AttemptScore>) -> Self {
        let average = if attempts.is_empty() {
            0.0
        } else {
            attempts.iter().map(|a| a.score as f64).sum::<f64>() / attempts.len() as f64
        };
        Self { attempts, average }
    }

    pub fn count(&self) -> usize {
        self.attempts.len()
    }
}

impl AchievementCondition {
    pub fn is_met(&self, history: &QuizHistory) -> bool {
        match self {
            AchievementCondition::QuizCount { value } => history.count() as i64 >= *value,
            AchievementCondition::PerfectScore { value } => {
                history.attempts.iter().any(|a| a.score >= *value)
            }
            AchievementCondition::AverageScore { value } => {
                history.count() >= MIN_QUIZZES_FOR_AVERAGE && history.average >= *value as f64
            }
            AchievementCondition::QuizPerfect { quiz_type, value } => history
                .attempts
                .iter()
                .any(|a| &a.quiz_type == quiz_type && a.score >= *value),
        }
    }
}

/// Definitions whose condition holds and that are not yet unlocked (by name).
pub fn evaluate<'a>(
    definitions: &'a [AchievementDefinition],
    history: &QuizHistory,
    unlocked: &HashSet<String>,
) -> Vec<&'a AchievementDefinition> {
    definitions
        .iter()
        .filter(|d| !unlocked.contains(d.name))
        .filter(|d| d.condition.is_met(history))
        .collect()
}

/// Recomputes the user's quiz statistics and unlocks every newly satisfied
/// achievement, crediting its points once.
///
/// Safe to call concurrently: the `(user_id, achievement_id)` unique key
/// decides which caller actually unlocks, and only that caller adds points.
pub async fn check_and_unlock_achievements(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<UnlockedAchievement>, AppError> {
    let unlocked: HashSet<String> = sqlx::query_scalar::<_, String>(
        r#"
        SELECT a.name
        FROM user_achievements ua
        JOIN achievements a ON a.id = ua.achievement_id
        WHERE ua.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .collect();

    let attempts = sqlx::query_as::<_, AttemptScore>(
        r#"
        SELECT quiz_type, score
        FROM quiz_results
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let history = QuizHistory::new(attempts);

    let mut newly_unlocked = Vec::new();
    for definition in evaluate(&DEFINITIONS, &history, &unlocked) {
        if let Some(achievement) = unlock(pool, user_id, definition).await? {
            newly_unlocked.push(achievement);
        }
    }

    Ok(newly_unlocked)
}

/// Makes sure the catalog row for `definition` exists and returns it.
/// Runs outside the unlock transaction, so an existing row is never locked.
async fn ensure_achievement(
    pool: &PgPool,
    definition: &AchievementDefinition,
) -> Result<Achievement, AppError> {
    sqlx::query(
        r#"
        INSERT INTO achievements (name, description, icon, points, category, condition)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(definition.name)
    .bind(definition.description)
    .bind(definition.icon)
    .bind(definition.points)
    .bind(definition.category)
    .bind(Json(definition.condition.clone()))
    .execute(pool)
    .await?;

    let achievement = sqlx::query_as::<_, Achievement>(
        r#"
        SELECT id, name, description, icon, points, category, condition
        FROM achievements
        WHERE name = $1
        "#,
    )
    .bind(definition.name)
    .fetch_one(pool)
    .await?;

    Ok(achievement)
}

/// Unlocks one achievement for the user. Returns `None` when another request
/// got there first.
async fn unlock(
    pool: &PgPool,
    user_id: i64,
    definition: &AchievementDefinition,
) -> Result<Option<UnlockedAchievement>, AppError> {
    let achievement = ensure_achievement(pool, definition).await?;

    let mut tx = pool.begin().await?;

    let unlocked_at = sqlx::query_scalar::<_, DateTime<Utc>>(
        r#"
        INSERT INTO user_achievements (user_id, achievement_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, achievement_id) DO NOTHING
        RETURNING unlocked_at
        "#,
    )
    .bind(user_id)
    .bind(achievement.id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(unlocked_at) = unlocked_at else {
        tx.commit().await?;
        return Ok(None);
    };

    sqlx::query("UPDATE users SET total_points = total_points + $1 WHERE id = $2")
        .bind(achievement.points)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        user_id,
        achievement = %achievement.name,
        points = achievement.points,
        "Achievement unlocked"
    );

    Ok(Some(UnlockedAchievement {
        id: achievement.id,
        name: achievement.name,
        description: achievement.description,
        icon: achievement.icon,
        points: achievement.points,
        category: achievement.category,
        unlocked_at,
    }))
}

/// Achievements the user has unlocked, newest first.
pub async fn list_unlocked(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<UnlockedAchievement>, AppError> {
    let list = sqlx::query_as::<_, UnlockedAchievement>(
        r#"
        SELECT a.id, a.name, a.description, a.icon, a.points, a.category, ua.unlocked_at
        FROM user_achievements ua
        JOIN achievements a ON a.id = ua.achievement_id
        WHERE ua.user_id = $1
        ORDER BY ua.unlocked_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(quiz_type: &str, score: i32) -> AttemptScore {
        AttemptScore {
            quiz_type: quiz_type.to_string(),
            score,
        }
    }

    fn names(defs: &[&AchievementDefinition]) -> Vec<&'static str> {
        defs.iter().map(|d| d.name).collect()
    }

    #[test]
    fn test_no_history_unlocks_nothing() {
        let history = QuizHistory::new(vec![]);
        assert!(evaluate(&DEFINITIONS, &history, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_first_quiz() {
        let history = QuizHistory::new(vec![attempt("password", 40)]);
        let unlocked = evaluate(&DEFINITIONS, &history, &HashSet::new());
        assert_eq!(names(&unlocked), vec!["First Steps"]);
    }

    #[test]
    fn test_perfect_phishing_unlocks_three() {
        let history = QuizHistory::new(vec![attempt("phishing", 100)]);
        let unlocked = evaluate(&DEFINITIONS, &history, &HashSet::new());
        assert_eq!(
            names(&unlocked),
            vec!["First Steps", "Perfect Score", "Phishing Expert"]
        );
    }

    #[test]
    fn test_average_requires_three_attempts() {
        let two = QuizHistory::new(vec![attempt("password", 90), attempt("password", 90)]);
        assert!(!names(&evaluate(&DEFINITIONS, &two, &HashSet::new())).contains(&"High Achiever"));

        let three = QuizHistory::new(vec![
            attempt("password", 90),
            attempt("password", 70),
            attempt("security", 80),
        ]);
        assert_eq!(three.average, 80.0);
        assert!(names(&evaluate(&DEFINITIONS, &three, &HashSet::new())).contains(&"High Achiever"));
    }

    #[test]
    fn test_quiz_master_at_five() {
        let four = QuizHistory::new((0..4).map(|_| attempt("password", 10)).collect());
        assert!(!names(&evaluate(&DEFINITIONS, &four, &HashSet::new())).contains(&"Quiz Master"));

        let five = QuizHistory::new((0..5).map(|_| attempt("password", 10)).collect());
        assert!(names(&evaluate(&DEFINITIONS, &five, &HashSet::new())).contains(&"Quiz Master"));
    }

    #[test]
    fn test_already_unlocked_are_skipped() {
        let history = QuizHistory::new(vec![attempt("security", 100)]);
        let unlocked: HashSet<String> = ["First Steps", "Perfect Score"]
            .into_iter()
            .map(String::from)
            .collect();
        let pending = evaluate(&DEFINITIONS, &history, &unlocked);
        assert_eq!(names(&pending), vec!["Security Specialist"]);

        let all: HashSet<String> = DEFINITIONS.iter().map(|d| d.name.to_string()).collect();
        assert!(evaluate(&DEFINITIONS, &history, &all).is_empty());
    }

    #[test]
    fn test_definition_names_are_unique() {
        let names: HashSet<&str> = DEFINITIONS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), DEFINITIONS.len());
    }
}
