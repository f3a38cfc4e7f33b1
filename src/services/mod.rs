// src/services/mod.rs

pub mod achievements;
pub mod analytics;
pub mod link_inspector;
pub mod password_strength;
pub mod progress;
pub mod quiz;
pub mod scoring;
