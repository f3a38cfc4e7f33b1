// src/content/catalog.rs

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Lesson,
    Tool,
    Quiz,
}

#[derive(Debug, Serialize)]
pub struct LearningModule {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ModuleKind,
    pub points: i32,
}

#[derive(Debug, Serialize)]
pub struct LearningPath {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub modules: &'static [LearningModule],
}

pub static LEARNING_PATHS: &[LearningPath] = &[
    LearningPath {
        id: "fundamentals",
        title: "Security Fundamentals",
        description: "Master the basics of cybersecurity",
        modules: &[
            LearningModule {
                id: "password-basics",
                title: "Password Security Basics",
                kind: ModuleKind::Lesson,
                points: 100,
            },
            LearningModule {
                id: "password-checker",
                title: "Password Strength Checker",
                kind: ModuleKind::Tool,
                points: 150,
            },
            LearningModule {
                id: "password-quiz",
                title: "Password Security Quiz",
                kind: ModuleKind::Quiz,
                points: 200,
            },
        ],
    },
    LearningPath {
        id: "phishing",
        title: "Phishing Awareness",
        description: "Learn to identify and prevent phishing attacks",
        modules: &[
            LearningModule {
                id: "phishing-basics",
                title: "Understanding Phishing",
                kind: ModuleKind::Lesson,
                points: 100,
            },
            LearningModule {
                id: "phishing-quiz",
                title: "Phishing Email Quiz",
                kind: ModuleKind::Quiz,
                points: 200,
            },
            LearningModule {
                id: "phishing-simulation",
                title: "Phishing Simulation",
                kind: ModuleKind::Tool,
                points: 250,
            },
        ],
    },
    LearningPath {
        id: "advanced",
        title: "Advanced Security",
        description: "Network defence, security tooling and incident response",
        modules: &[
            LearningModule {
                id: "network-security",
                title: "Network Security",
                kind: ModuleKind::Lesson,
                points: 150,
            },
            LearningModule {
                id: "security-quiz",
                title: "Security Fundamentals Quiz",
                kind: ModuleKind::Quiz,
                points: 300,
            },
            LearningModule {
                id: "security-tools",
                title: "Security Tools Workshop",
                kind: ModuleKind::Tool,
                points: 200,
            },
        ],
    },
];

/// Looks a module up by id, returning it with the id of its path.
pub fn find_module(module_id: &str) -> Option<(&'static LearningPath, &'static LearningModule)> {
    LEARNING_PATHS.iter().find_map(|path| {
        path.modules
            .iter()
            .find(|m| m.id == module_id)
            .map(|m| (path, m))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_module_ids_unique() {
        let ids: Vec<&str> = LEARNING_PATHS
            .iter()
            .flat_map(|p| p.modules.iter().map(|m| m.id))
            .collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn test_find_module() {
        let (path, module) = find_module("phishing-quiz").unwrap();
        assert_eq!(path.id, "phishing");
        assert_eq!(module.kind, ModuleKind::Quiz);
        assert!(find_module("does-not-exist").is_none());
    }
}
