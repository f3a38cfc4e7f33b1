// src/content/lessons.rs

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LessonSection {
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Lesson {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    /// Quiz that tests this lesson, if any.
    pub quiz_type: Option<&'static str>,
    pub sections: &'static [LessonSection],
}

pub static LESSONS: &[Lesson] = &[
    Lesson {
        slug: "password-basics",
        title: "Password Security Basics",
        summary: "Why passwords matter and how to build ones that hold up.",
        quiz_type: Some("password"),
        sections: &[
            LessonSection {
                heading: "Why Password Security Matters",
                body: "Most account takeovers start with a guessed, reused or leaked password. \
                       A strong, unique password per site limits the damage of any single breach.",
            },
            LessonSection {
                heading: "What Makes a Strong Password?",
                body: "Length first: aim for at least 12 characters. Mix upper and lower case, \
                       digits and symbols, and avoid anything tied to you personally.",
            },
            LessonSection {
                heading: "Common Password Mistakes",
                body: "Reusing passwords, keyboard patterns such as qwerty123, dictionary words \
                       with a trailing digit, and birthdays or pet names.",
            },
            LessonSection {
                heading: "Best Practices",
                body: "Use a reputable password manager, enable two-factor authentication, and \
                       change a password when a service reports a breach.",
            },
            LessonSection {
                heading: "Password Creation Methods",
                body: "Passphrases of several random words (Coffee-Mountain-42-Blue!) are long, \
                       memorable and hard to guess. Generated passwords are better still.",
            },
        ],
    },
    Lesson {
        slug: "phishing-basics",
        title: "Understanding Phishing",
        summary: "How phishing works and the red flags that give it away.",
        quiz_type: Some("phishing"),
        sections: &[
            LessonSection {
                heading: "What is Phishing?",
                body: "Phishing is a social engineering attack where a message impersonates a \
                       trusted party to steal credentials, money or data.",
            },
            LessonSection {
                heading: "Common Phishing Techniques",
                body: "Mass email campaigns, spear phishing aimed at one person, SMS (smishing), \
                       voice calls (vishing) and cloned login pages.",
            },
            LessonSection {
                heading: "Red Flags to Watch For",
                body: "Urgent or threatening language, generic greetings, look-alike sender \
                       domains, unexpected attachments and links whose target differs from \
                       their text.",
            },
            LessonSection {
                heading: "How to Verify Suspicious Messages",
                body: "Do not use the contact details in the message. Go to the official site or \
                       app yourself, or call a number you already trust.",
            },
            LessonSection {
                heading: "Protection Strategies",
                body: "Enable two-factor authentication, keep software updated, report phishing \
                       to your provider and never enter credentials after following an email link.",
            },
        ],
    },
    Lesson {
        slug: "network-security",
        title: "Network Security",
        summary: "The building blocks that keep traffic and services safe.",
        quiz_type: Some("security"),
        sections: &[
            LessonSection {
                heading: "What is Network Security?",
                body: "The policies and controls that protect the confidentiality, integrity and \
                       availability of data as it moves across networks.",
            },
            LessonSection {
                heading: "Core Network Security Components",
                body: "Firewalls filter traffic, VPNs encrypt it, intrusion detection systems \
                       watch it, and DMZs isolate public-facing services from internal ones.",
            },
            LessonSection {
                heading: "Common Network Threats",
                body: "Denial of service floods, man-in-the-middle interception, malware spreading \
                       laterally, and misconfigured or unpatched devices.",
            },
            LessonSection {
                heading: "Home Network Security",
                body: "Change default router credentials, use WPA3 or WPA2, keep firmware updated \
                       and put smart devices on a guest network.",
            },
            LessonSection {
                heading: "Incident Response",
                body: "Prepare, detect, contain, eradicate, recover, and review what happened so \
                       the next incident is handled faster.",
            },
        ],
    },
];

pub fn find_lesson(slug: &str) -> Option<&'static Lesson> {
    LESSONS.iter().find(|l| l.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{catalog::find_module, quizzes::find_quiz};

    #[test]
    fn test_every_lesson_is_a_catalog_module() {
        for lesson in LESSONS {
            assert!(find_module(lesson.slug).is_some(), "{} missing", lesson.slug);
        }
    }

    #[test]
    fn test_lesson_quizzes_exist() {
        for lesson in LESSONS {
            if let Some(quiz_type) = lesson.quiz_type {
                assert!(find_quiz(quiz_type).is_some());
            }
        }
        assert!(find_lesson("sql-injection").is_none());
    }
}
