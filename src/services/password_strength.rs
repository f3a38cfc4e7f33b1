// src/services/password_strength.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SPECIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));

pub const MIN_LENGTH: usize = 8;

/// (label, upper bound of the strength percentage it covers)
const LEVELS: [(&str, u32); 5] = [
    ("Very Weak", 20),
    ("Weak", 40),
    ("Medium", 60),
    ("Strong", 80),
    ("Very Strong", 100),
];

#[derive(Debug, Serialize, PartialEq)]
pub struct Criterion {
    pub key: &'static str,
    pub met: bool,
}

#[derive(Debug, Serialize)]
pub struct StrengthReport {
    /// Share of criteria met, 0..=100.
    pub strength: u32,
    pub label: &'static str,
    pub criteria: Vec<Criterion>,
    /// Requirement messages for every unmet criterion.
    pub errors: Vec<&'static str>,
    /// Brute-force entropy estimate: length * log2(alphabet size).
    pub entropy_bits: f64,
}

pub fn check(password: &str) -> StrengthReport {
    if password.is_empty() {
        return StrengthReport {
            strength: 0,
            label: LEVELS[0].0,
            criteria: Vec::new(),
            errors: Vec::new(),
            entropy_bits: 0.0,
        };
    }

    let checks: [(&'static str, bool, &'static str); 5] = [
        (
            "length",
            password.chars().count() >= MIN_LENGTH,
            "Password must be at least 8 characters",
        ),
        (
            "uppercase",
            UPPERCASE.is_match(password),
            "Password must contain at least one uppercase letter",
        ),
        (
            "lowercase",
            LOWERCASE.is_match(password),
            "Password must contain at least one lowercase letter",
        ),
        (
            "digit",
            DIGIT.is_match(password),
            "Password must contain at least one number",
        ),
        (
            "special",
            SPECIAL.is_match(password),
            "Password must contain at least one special character",
        ),
    ];

    let met = checks.iter().filter(|(_, ok, _)| *ok).count() as u32;
    let strength = met * 100 / checks.len() as u32;

    StrengthReport {
        strength,
        label: label_for(strength),
        criteria: checks
            .iter()
            .map(|(key, met, _)| Criterion {
                key: *key,
                met: *met,
            })
            .collect(),
        errors: checks
            .iter()
            .filter(|(_, ok, _)| !*ok)
            .map(|(_, _, msg)| *msg)
            .collect(),
        entropy_bits: entropy_bits(password),
    }
}

pub fn label_for(strength: u32) -> &'static str {
    LEVELS
        .iter()
        .find(|(_, upper)| strength <= *upper)
        .map(|(label, _)| *label)
        .unwrap_or(LEVELS[LEVELS.len() - 1].0)
}

fn entropy_bits(password: &str) -> f64 {
    let mut pool = 0u32;
    if LOWERCASE.is_match(password) {
        pool += 26;
    }
    if UPPERCASE.is_match(password) {
        pool += 26;
    }
    if DIGIT.is_match(password) {
        pool += 10;
    }
    if SPECIAL.is_match(password) {
        pool += 33;
    }
    if pool == 0 {
        return 0.0;
    }
    let bits = password.chars().count() as f64 * (pool as f64).log2();
    (bits * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let report = check("");
        assert_eq!(report.strength, 0);
        assert_eq!(report.label, "Very Weak");
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_lowercase_only() {
        let report = check("abc");
        assert_eq!(report.strength, 20);
        assert_eq!(report.label, "Very Weak");
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn test_all_criteria() {
        let report = check("Coffee-Mountain-42-Blue!");
        assert_eq!(report.strength, 100);
        assert_eq!(report.label, "Very Strong");
        assert!(report.errors.is_empty());
        assert!(report.criteria.iter().all(|c| c.met));
    }

    #[test]
    fn test_missing_special() {
        let report = check("Password123");
        assert_eq!(report.strength, 80);
        assert_eq!(report.label, "Strong");
        assert_eq!(
            report.errors,
            vec!["Password must contain at least one special character"]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_for(0), "Very Weak");
        assert_eq!(label_for(40), "Weak");
        assert_eq!(label_for(60), "Medium");
        assert_eq!(label_for(100), "Very Strong");
    }

    #[test]
    fn test_entropy_grows_with_length() {
        let short = check("abcd").entropy_bits;
        let long = check("abcdabcd").entropy_bits;
        assert!(long > short);
        assert_eq!(check("aaaa").entropy_bits, 18.8); // 4 * log2(26)
    }
}
