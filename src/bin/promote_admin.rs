// src/bin/promote_admin.rs
//
// Usage: promote-admin <email>

use cyberguard::config::Config;
use cyberguard::models::user::Role;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.rust_log))
        .with_target(false)
        .init();

    let Some(email) = std::env::args().nth(1) else {
        eprintln!("Usage: promote-admin <email>");
        std::process::exit(2);
    };
    let email = email.trim().to_lowercase();

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await?;

    let promoted = sqlx::query_scalar::<_, i64>(
        "UPDATE users SET role = $1, updated_at = NOW() WHERE email = $2 RETURNING id",
    )
    .bind(Role::Admin.as_str())
    .bind(&email)
    .fetch_optional(&pool)
    .await?;

    match promoted {
        Some(id) => {
            tracing::info!(user_id = id, "Promoted {} to admin", email);
            Ok(())
        }
        None => {
            tracing::error!("No user with email {}", email);
            std::process::exit(1);
        }
    }
}
