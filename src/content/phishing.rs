// src/content/phishing.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::services::scoring::percentage;

#[derive(Debug)]
pub struct SimulationEmail {
    pub id: &'static str,
    pub subject: &'static str,
    pub sender: &'static str,
    pub content: &'static str,
    pub is_phishing: bool,
    pub indicators: &'static [&'static str],
    pub explanation: &'static str,
}

/// Email as shown before the user decides.
#[derive(Debug, Serialize)]
pub struct PublicEmail {
    pub id: &'static str,
    pub subject: &'static str,
    pub sender: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EmailVerdict {
    pub id: &'static str,
    pub choice: Option<bool>,
    pub is_phishing: bool,
    pub correct: bool,
    pub indicators: &'static [&'static str],
    pub explanation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub score: usize,
    pub total: usize,
    pub percentage: i32,
    pub verdicts: Vec<EmailVerdict>,
}

pub static SIMULATION_EMAILS: &[SimulationEmail] = &[
    SimulationEmail {
        id: "sim-1",
        subject: "Urgent: Your PayPal Account Has Been Limited",
        sender: "security@payp4l-support.com",
        content: "Dear Valued Customer,\n\nWe have detected suspicious activity on your PayPal \
                  account. Your account has been temporarily limited for your protection.\n\n\
                  To restore full access, verify your information immediately using the link \
                  below:\n\n[Verify Account Now]\n\nIf you do not verify within 24 hours, your \
                  account will be permanently suspended.\n\nPayPal Security Team",
        is_phishing: true,
        indicators: &[
            "Misspelled domain: payp4l-support.com",
            "Generic greeting: \"Dear Valued Customer\"",
            "Urgent threatening language",
            "Suspicious verification link",
            "Creates false sense of urgency",
        ],
        explanation: "A classic phishing email. PayPal does not ask you to verify account \
                      information through email links, and the domain is misspelled to trick you.",
    },
    SimulationEmail {
        id: "sim-2",
        subject: "Your Monthly Statement is Ready",
        sender: "statements@chase.com",
        content: "Hello John Smith,\n\nYour Chase credit card statement for March is now \
                  available online.\n\nStatement Date: March 15\nAmount Due: $1,247.83\n\
                  Due Date: April 10\n\nTo view your statement, log in to your Chase account or \
                  use our mobile app.\n\nChase Customer Service",
        is_phishing: false,
        indicators: &[
            "Legitimate domain: chase.com",
            "Personal greeting with actual name",
            "Specific account information",
            "No suspicious links or attachments",
            "Official contact information provided",
        ],
        explanation: "A legitimate statement notification. It uses the correct domain, includes \
                      specific details, and does not ask for sensitive information.",
    },
    SimulationEmail {
        id: "sim-3",
        subject: "Action Required: Microsoft Account Security Alert",
        sender: "account-security@microsoft.com",
        content: "Microsoft Account Team\n\nWe detected an unusual sign-in to your Microsoft \
                  account.\n\nLocation: Moscow, Russia\nDevice: Unknown Windows PC\n\n\
                  If this was you, you can safely ignore this email. If not, change your \
                  password, review recent activity and enable two-factor authentication from \
                  your Microsoft Account Security page.",
        is_phishing: false,
        indicators: &[
            "Legitimate domain: microsoft.com",
            "Specific security information provided",
            "Does not ask for immediate action via links",
            "Provides helpful security recommendations",
            "Professional formatting and language",
        ],
        explanation: "A legitimate security alert. It describes the activity and gives advice \
                      without asking you to click a link.",
    },
];

pub fn public_emails() -> Vec<PublicEmail> {
    SIMULATION_EMAILS
        .iter()
        .map(|e| PublicEmail {
            id: e.id,
            subject: e.subject,
            sender: e.sender,
            content: e.content,
        })
        .collect()
}

/// Grades "is this phishing?" choices keyed by email id.
pub fn grade(choices: &HashMap<String, bool>) -> Result<SimulationReport, String> {
    if let Some(unknown) = choices
        .keys()
        .find(|id| !SIMULATION_EMAILS.iter().any(|e| e.id == id.as_str()))
    {
        return Err(format!("Unknown email id '{unknown}'"));
    }

    let verdicts: Vec<EmailVerdict> = SIMULATION_EMAILS
        .iter()
        .map(|e| {
            let choice = choices.get(e.id).copied();
            EmailVerdict {
                id: e.id,
                choice,
                is_phishing: e.is_phishing,
                correct: choice == Some(e.is_phishing),
                indicators: e.indicators,
                explanation: e.explanation,
            }
        })
        .collect();

    let score = verdicts.iter().filter(|v| v.correct).count();
    let total = SIMULATION_EMAILS.len();

    Ok(SimulationReport {
        score,
        total,
        percentage: percentage(score as i64, total as i64),
        verdicts,
    })
}
