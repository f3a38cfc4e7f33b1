// src/handlers/tools.rs

use std::collections::HashMap;

use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    content::phishing::{self, public_emails},
    error::AppError,
    services::{link_inspector, password_strength},
    utils::extract::AppJson,
};

#[derive(Debug, Deserialize)]
pub struct PasswordCheckRequest {
    #[serde(default)]
    pub password: String,
}

/// Scores a password against the five strength criteria.
/// Nothing is stored or logged.
pub async fn password_strength(
    AppJson(req): AppJson<PasswordCheckRequest>,
) -> impl IntoResponse {
    Json(password_strength::check(&req.password))
}

pub async fn phishing_simulation() -> impl IntoResponse {
    Json(json!({ "emails": public_emails() }))
}

#[derive(Debug, Deserialize)]
pub struct SimulationChoices {
    /// Email id → "this is phishing".
    #[serde(default)]
    pub choices: HashMap<String, bool>,
}

/// Reveals the verdicts for the user's choices.
pub async fn grade_phishing_simulation(
    AppJson(req): AppJson<SimulationChoices>,
) -> Result<impl IntoResponse, AppError> {
    if req.choices.is_empty() {
        return Err(AppError::BadRequest("No choices submitted".to_string()));
    }

    let report = phishing::grade(&req.choices).map_err(AppError::BadRequest)?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct LinkInspectRequest {
    #[serde(default)]
    pub url: String,
}

/// Lists the red flags found in a URL.
pub async fn link_inspector(
    AppJson(req): AppJson<LinkInspectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let raw = req.url.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("url is required".to_string()));
    }

    let report = link_inspector::inspect(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid URL: {}", e)))?;
    Ok(Json(report))
}
