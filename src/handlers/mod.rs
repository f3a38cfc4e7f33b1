// src/handlers/mod.rs

pub mod account;
pub mod achievements;
pub mod admin;
pub mod auth;
pub mod health;
pub mod learn;
pub mod progress;
pub mod quiz;
pub mod tools;
