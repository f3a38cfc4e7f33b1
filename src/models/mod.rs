// src/models/mod.rs

pub mod achievement;
pub mod admin;
pub mod progress;
pub mod quiz_result;
pub mod user;
