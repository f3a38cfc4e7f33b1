// src/services/scoring.rs

use chrono::{DateTime, Utc};

use crate::config::PASSING_SCORE;

/// Percentage of correct answers, rounded half-up to the nearest integer.
/// Returns 0 when there were no questions.
pub fn percentage(correct: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    let correct = correct.clamp(0, total);
    // floor(correct / total * 100 + 0.5) in integer arithmetic
    ((correct * 200 + total) / (2 * total)) as i32
}

/// Points credited for an attempt: the percentage of correct answers.
pub fn points_earned(correct_answers: i32, total_questions: i32) -> i32 {
    percentage(correct_answers as i64, total_questions as i64)
}

pub fn passed(score: i32) -> bool {
    score >= PASSING_SCORE
}

/// Rounds an aggregate average the way the dashboard shows it.
pub fn round_average(avg: Option<f64>) -> i64 {
    avg.map(|v| v.round() as i64).unwrap_or(0)
}

/// Daily streak after activity at `now`.
///
/// Same calendar day (UTC) keeps the streak, the following day extends it,
/// anything else starts over at 1.
pub fn next_streak(last_active: Option<DateTime<Utc>>, current: i32, now: DateTime<Utc>) -> i32 {
    let Some(last) = last_active else {
        return 1;
    };
    let days = (now.date_naive() - last.date_naive()).num_days();
    match days {
        0 => current.max(1),
        1 => current.max(0) + 1,
        _ => 1,
    }
}
