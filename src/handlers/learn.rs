// src/handlers/learn.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::{
    content::{catalog::LEARNING_PATHS, lessons::find_lesson},
    error::AppError,
    utils::extract::AppPath,
};

pub async fn learning_paths() -> impl IntoResponse {
    Json(json!({ "paths": LEARNING_PATHS }))
}

/// Lesson content by slug.
pub async fn get_lesson(AppPath(slug): AppPath<String>) -> Result<impl IntoResponse, AppError> {
    let lesson = find_lesson(&slug).ok_or(AppError::NotFound("Lesson not found".to_string()))?;
    Ok(Json(lesson))
}
