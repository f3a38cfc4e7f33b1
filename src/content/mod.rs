// src/content/mod.rs
//
// Static learning content: paths, lessons, quiz banks and simulated emails.

pub mod catalog;
pub mod lessons;
pub mod phishing;
pub mod quizzes;
