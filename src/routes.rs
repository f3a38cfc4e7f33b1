// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{account, achievements, admin, auth, health, learn, progress, quiz, tools},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Assembles the main application router.
///
/// * Public routes: auth entry points, content, tools, health.
/// * Session routes sit behind `auth_middleware`.
/// * Admin routes add `admin_middleware` inside the auth layer.
/// * Anything outside `/api` falls through to the static site.
pub fn create_router(state: AppState) -> Router {
    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(
            Router::new()
                .route("/session", get(auth::session))
                .layer(require_auth.clone()),
        );

    let quiz_routes = Router::new()
        .route("/submit", post(quiz::submit_quiz))
        .route("/results", get(quiz::list_results))
        .layer(require_auth.clone());

    let quizzes_routes = Router::new()
        .route("/", get(quiz::list_quizzes))
        .route("/{quiz_type}", get(quiz::get_quiz))
        .merge(
            Router::new()
                .route("/{quiz_type}/grade", post(quiz::grade_quiz))
                .layer(require_auth.clone()),
        );

    let user_routes = Router::new()
        .route(
            "/progress",
            get(progress::get_progress).post(progress::update_progress),
        )
        .route("/change-password", post(account::change_password))
        .route("/delete-account", delete(account::delete_account))
        .layer(require_auth.clone());

    let achievement_routes = Router::new()
        .route("/catalog", get(achievements::catalog))
        .merge(
            Router::new()
                .route("/", get(achievements::list_achievements))
                .route("/check", post(achievements::check_achievements))
                .layer(require_auth.clone()),
        );

    let admin_routes = Router::new()
        .route("/analytics", get(admin::analytics))
        .route("/users", get(admin::list_users).patch(admin::update_role))
        .route("/users/{id}", delete(admin::delete_user))
        // Auth runs first, then the admin check
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ))
        .layer(require_auth)
        .merge(Router::new().route("/reset-password", post(admin::reset_password)));

    let tool_routes = Router::new()
        .route("/password-strength", post(tools::password_strength))
        .route(
            "/phishing-simulation",
            get(tools::phishing_simulation),
        )
        .route(
            "/phishing-simulation/grade",
            post(tools::grade_phishing_simulation),
        )
        .route("/link-inspector", post(tools::link_inspector));

    let cors = cors_layer(&state.config.cors_origins);
    let static_site = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/quizzes", quizzes_routes)
        .nest("/api/user", user_routes)
        .nest("/api/achievements", achievement_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/tools", tool_routes)
        .route("/api/learn/paths", get(learn::learning_paths))
        .route("/api/lessons/{slug}", get(learn::get_lesson))
        .route("/api/health", get(health::health))
        .fallback_service(static_site)
        // Global Middleware: trace wraps cors
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
