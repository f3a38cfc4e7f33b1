// src/services/progress.rs

use crate::{
    content::catalog::find_module,
    models::progress::{
        ModuleProgressView, ModuleStats, ModuleStatsRow, ProgressCounts, ProgressStatus,
        UserProgress,
    },
    services::scoring::{percentage, round_average},
};

pub fn summarize(rows: &[UserProgress]) -> ProgressCounts {
    let completed = rows
        .iter()
        .filter(|p| p.status == ProgressStatus::Completed.as_str())
        .count();
    let in_progress = rows
        .iter()
        .filter(|p| p.status == ProgressStatus::InProgress.as_str())
        .count();

    ProgressCounts {
        overall: percentage(completed as i64, rows.len() as i64) as i64,
        completed,
        in_progress,
        total: rows.len(),
    }
}

pub fn module_stats(rows: Vec<ModuleStatsRow>) -> Vec<ModuleStats> {
    rows.into_iter()
        .map(|r| ModuleStats {
            module_id: r.module_id.unwrap_or_else(|| "unknown".to_string()),
            average_score: round_average(r.average_score),
            attempts_count: r.attempts,
        })
        .collect()
}

/// Attaches catalog title and path to each progress row when known.
pub fn with_catalog(rows: Vec<UserProgress>) -> Vec<ModuleProgressView> {
    rows.into_iter()
        .map(|progress| {
            let found = find_module(&progress.module_id);
            ModuleProgressView {
                title: found.map(|(_, m)| m.title),
                path_id: found.map(|(p, _)| p.id),
                progress,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn progress(module_id: &str, status: ProgressStatus) -> UserProgress {
        UserProgress {
            user_id: 1,
            module_id: module_id.into(),
            status: status.as_str().into(),
            score: None,
            completed_at: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_empty() {
        let counts = summarize(&[]);
        assert_eq!(
            counts,
            ProgressCounts {
                overall: 0,
                completed: 0,
                in_progress: 0,
                total: 0
            }
        );
    }

    #[test]
    fn test_summarize_mixed() {
        let rows = vec![
            progress("password-basics", ProgressStatus::Completed),
            progress("password-quiz", ProgressStatus::InProgress),
            progress("phishing-quiz", ProgressStatus::Locked),
        ];
        let counts = summarize(&rows);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.overall, 33);
    }

    #[test]
    fn test_module_stats_unknown_module() {
        let stats = module_stats(vec![ModuleStatsRow {
            module_id: None,
            average_score: Some(72.5),
            attempts: 2,
        }]);
        assert_eq!(stats[0].module_id, "unknown");
        assert_eq!(stats[0].average_score, 73);
    }

    #[test]
    fn test_with_catalog() {
        let views = with_catalog(vec![
            progress("phishing-simulation", ProgressStatus::Completed),
            progress("custom-module", ProgressStatus::InProgress),
        ]);
        assert_eq!(views[0].title, Some("Phishing Simulation"));
        assert_eq!(views[0].path_id, Some("phishing"));
        assert_eq!(views[1].title, None);
    }
}
