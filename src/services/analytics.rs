// src/services/analytics.rs

use std::collections::BTreeMap;

use crate::{
    models::admin::{ActivityRow, QuizTypeRow, QuizTypeStat},
    services::scoring::round_average,
};

/// Attempts per UTC day, keyed `YYYY-MM-DD`.
pub fn daily_activity(rows: &[ActivityRow]) -> BTreeMap<String, i64> {
    let mut daily = BTreeMap::new();
    for row in rows {
        let day = row.created_at.date_naive().format("%Y-%m-%d").to_string();
        *daily.entry(day).or_insert(0) += 1;
    }
    daily
}

/// Rounds per-type averages and builds the type → average lookup.
pub fn quiz_type_stats(rows: Vec<QuizTypeRow>) -> (Vec<QuizTypeStat>, BTreeMap<String, i64>) {
    let by_type: Vec<QuizTypeStat> = rows
        .into_iter()
        .map(|r| QuizTypeStat {
            quiz_type: r.quiz_type,
            count: r.count,
            average_score: round_average(r.average_score),
        })
        .collect();

    let averages = by_type
        .iter()
        .map(|s| (s.quiz_type.clone(), s.average_score))
        .collect();

    (by_type, averages)
}

/// Row offset of a 1-based page, or `None` when it does not fit in an i64.
pub fn page_offset(page: i64, limit: i64) -> Option<i64> {
    page.max(1).checked_sub(1)?.checked_mul(limit)
}

/// `ILIKE` pattern matching `search` anywhere, with `\`, `%` and `_` taken
/// literally. Pair with `ESCAPE '\'`.
pub fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Number of pages needed for `total` rows at `limit` per page.
pub fn page_count(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}
