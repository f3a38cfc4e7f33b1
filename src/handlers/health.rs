// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;

/// Liveness probe. Always 200; `database` reports whether a ping succeeded.
pub async fn health(State(pool): State<PgPool>) -> impl IntoResponse {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!("Health check database ping failed: {:?}", e);
            "disconnected"
        }
    };

    let status = if database == "connected" { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "database": database,
    }))
}
