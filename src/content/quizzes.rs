// src/content/quizzes.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::services::scoring::percentage;

#[derive(Debug)]
pub struct Question {
    pub id: i64,
    pub question: &'static str,
    pub options: &'static [&'static str],
    /// Index into `options`.
    pub correct: usize,
    pub explanation: &'static str,
}

#[derive(Debug)]
pub struct Quiz {
    pub quiz_type: &'static str,
    pub title: &'static str,
    pub module_id: &'static str,
    pub questions: &'static [Question],
}

/// Question as sent to the client (no answer, no explanation).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: &'static str,
    pub options: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct QuizSummary {
    pub quiz_type: &'static str,
    pub title: &'static str,
    pub module_id: &'static str,
    pub question_count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct QuestionFeedback {
    pub id: i64,
    pub selected: Option<usize>,
    pub correct_option: usize,
    pub is_correct: bool,
    pub explanation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GradeReport {
    pub correct_count: usize,
    pub total_questions: usize,
    pub score: i32,
    pub feedback: Vec<QuestionFeedback>,
}

impl Quiz {
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            quiz_type: self.quiz_type,
            title: self.title,
            module_id: self.module_id,
            question_count: self.questions.len(),
        }
    }

    pub fn public_questions(&self) -> Vec<PublicQuestion> {
        self.questions
            .iter()
            .map(|q| PublicQuestion {
                id: q.id,
                question: q.question,
                options: q.options,
            })
            .collect()
    }

    /// Grades selected option indices keyed by question id.
    /// Unanswered questions count as wrong; ids outside this quiz are rejected.
    pub fn grade(&self, answers: &HashMap<i64, usize>) -> Result<GradeReport, String> {
        if let Some(unknown) = answers
            .keys()
            .find(|id| !self.questions.iter().any(|q| q.id == **id))
        {
            return Err(format!("Question {unknown} is not part of this quiz"));
        }

        let feedback: Vec<QuestionFeedback> = self
            .questions
            .iter()
            .map(|q| {
                let selected = answers.get(&q.id).copied();
                QuestionFeedback {
                    id: q.id,
                    selected,
                    correct_option: q.correct,
                    is_correct: selected == Some(q.correct),
                    explanation: q.explanation,
                }
            })
            .collect();

        let correct_count = feedback.iter().filter(|f| f.is_correct).count();
        let total_questions = self.questions.len();

        Ok(GradeReport {
            correct_count,
            total_questions,
            score: percentage(correct_count as i64, total_questions as i64),
            feedback,
        })
    }
}

pub static QUIZZES: &[Quiz] = &[
    Quiz {
        quiz_type: "password",
        title: "Password Security Quiz",
        module_id: "password-quiz",
        questions: &[
            Question {
                id: 1,
                question: "What is the minimum recommended length for a strong password?",
                options: &["6 characters", "8 characters", "12 characters", "16 characters"],
                correct: 2,
                explanation: "At least 12 characters is the common recommendation. Each extra \
                              character makes brute force dramatically harder.",
            },
            Question {
                id: 2,
                question: "Which of these is the strongest password?",
                options: &["Password123!", "MyBirthday1990", "Coffee-Mountain-42-Blue!", "qwerty123"],
                correct: 2,
                explanation: "A passphrase of random words, digits and symbols is long and \
                              unpredictable while staying memorable.",
            },
            Question {
                id: 3,
                question: "A site you use was breached. What should you do?",
                options: &[
                    "Change the password on that site only",
                    "Change it on every site where you used the same password",
                    "Wait to see if anything happens",
                    "Contact the police",
                ],
                correct: 1,
                explanation: "Attackers replay leaked credentials on other services, so every \
                              reuse of that password is exposed.",
            },
            Question {
                id: 4,
                question: "What is the best way to store your passwords?",
                options: &[
                    "Write them down on paper",
                    "Save them in a text file",
                    "Use a reputable password manager",
                    "Memorize all of them",
                ],
                correct: 2,
                explanation: "Password managers encrypt your vault and make unique passwords \
                              per site practical.",
            },
            Question {
                id: 5,
                question: "Why is two-factor authentication important?",
                options: &[
                    "It makes passwords unnecessary",
                    "It adds a second layer if the password is compromised",
                    "It makes passwords longer",
                    "It is required by law",
                ],
                correct: 1,
                explanation: "A stolen password alone is no longer enough to sign in.",
            },
        ],
    },
    Quiz {
        quiz_type: "phishing",
        title: "Phishing Email Quiz",
        module_id: "phishing-quiz",
        questions: &[
            Question {
                id: 1,
                question: "An email from security@bank.com asks you to click a link to verify \
                           your details or your account will be suspended. What is it?",
                options: &["Legitimate", "Phishing"],
                correct: 1,
                explanation: "Banks do not ask for personal information by email, and threats of \
                              suspension are a pressure tactic.",
            },
            Question {
                id: 2,
                question: "A no-reply@amazon.com message confirms an order you placed and links \
                           to tracking. What is it?",
                options: &["Legitimate", "Phishing"],
                correct: 0,
                explanation: "It matches a real action you took, carries specific details and asks \
                              for nothing sensitive.",
            },
            Question {
                id: 3,
                question: "\"URGENT: your password expires today, click here to keep your account\". \
                           What is it?",
                options: &["Legitimate", "Phishing"],
                correct: 1,
                explanation: "Urgency plus a credential-reset link is the classic phishing shape.",
            },
            Question {
                id: 4,
                question: "Which sender address is most suspicious?",
                options: &[
                    "statements@chase.com",
                    "security@payp4l-support.com",
                    "no-reply@github.com",
                    "account-security@microsoft.com",
                ],
                correct: 1,
                explanation: "The digit 4 stands in for the letter a, and the brand sits in an \
                              unrelated domain.",
            },
        ],
    },
    Quiz {
        quiz_type: "security",
        title: "Security Fundamentals Quiz",
        module_id: "security-quiz",
        questions: &[
            Question {
                id: 1,
                question: "What is the primary purpose of a firewall?",
                options: &[
                    "Speed up the network",
                    "Monitor and filter traffic based on security rules",
                    "Store backups",
                    "Encrypt hard drives",
                ],
                correct: 1,
                explanation: "A firewall sits between trusted and untrusted networks and enforces \
                              which traffic may pass.",
            },
            Question {
                id: 2,
                question: "What distinguishes a VPN from a simple proxy?",
                options: &[
                    "Nothing, they are the same",
                    "A VPN encrypts all traffic through a tunnel",
                    "A proxy is always faster and safer",
                    "A VPN only works for email",
                ],
                correct: 1,
                explanation: "A proxy forwards requests; a VPN encrypts everything between you and \
                              the VPN endpoint.",
            },
            Question {
                id: 3,
                question: "What is a DDoS attack?",
                options: &[
                    "Stealing a database",
                    "Overwhelming a service with traffic from many sources",
                    "Guessing passwords",
                    "Intercepting Wi-Fi traffic",
                ],
                correct: 1,
                explanation: "Many compromised machines flood one target until it cannot serve \
                              legitimate users.",
            },
            Question {
                id: 4,
                question: "What is a DMZ used for?",
                options: &[
                    "Hosting public-facing services apart from the internal LAN",
                    "Blocking all incoming traffic",
                    "Storing encryption keys",
                    "Testing malware",
                ],
                correct: 0,
                explanation: "The DMZ exposes external services while keeping the internal network \
                              behind another layer.",
            },
            Question {
                id: 5,
                question: "What is a man-in-the-middle attack?",
                options: &[
                    "An insider leaking data",
                    "Secretly intercepting and possibly altering communication",
                    "A virus that spreads by USB",
                    "Overloading a server",
                ],
                correct: 1,
                explanation: "The attacker relays traffic between two parties who think they talk \
                              directly.",
            },
        ],
    },
];

pub fn find_quiz(quiz_type: &str) -> Option<&'static Quiz> {
    QUIZZES.iter().find(|q| q.quiz_type == quiz_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_indices_in_range() {
        for quiz in QUIZZES {
            for q in quiz.questions {
                assert!(q.correct < q.options.len(), "{} #{}", quiz.quiz_type, q.id);
            }
        }
    }

    #[test]
    fn test_grade_perfect() {
        let quiz = find_quiz("password").unwrap();
        let answers: HashMap<i64, usize> = quiz.questions.iter().map(|q| (q.id, q.correct)).collect();
        let report = quiz.grade(&answers).unwrap();
        assert_eq!(report.correct_count, quiz.questions.len());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_grade_unanswered_counts_wrong() {
        let quiz = find_quiz("security").unwrap();
        let mut answers = HashMap::new();
        answers.insert(1, 1);
        answers.insert(2, 0); // wrong
        let report = quiz.grade(&answers).unwrap();
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.total_questions, 5);
        assert_eq!(report.score, 20);
        assert_eq!(report.feedback[2].selected, None);
        assert!(!report.feedback[2].is_correct);
    }

    #[test]
    fn test_grade_rejects_foreign_question() {
        let quiz = find_quiz("phishing").unwrap();
        let mut answers = HashMap::new();
        answers.insert(99, 0);
        assert!(quiz.grade(&answers).is_err());
    }

    #[test]
    fn test_public_questions_hide_answers() {
        let quiz = find_quiz("phishing").unwrap();
        let json = serde_json::to_value(quiz.public_questions()).unwrap();
        assert!(json[0].get("correct").is_none());
        assert!(json[0].get("explanation").is_none());
    }
}
