//! Router assembly.
//!
//! Public routes (register, login, health) carry no middleware; everything
//! else sits behind `require_auth`, which resolves the bearer token to a
//! live identity before any handler runs. Per-handler policy checks decide
//! the rest.

use crate::api::training::{self, TrainingState};
use crate::auth::{api as auth_api, require_auth, AuthState};
use crate::middleware::request_logging;
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Create the API router
pub fn create_router(auth_state: AuthState, training_state: TrainingState) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth_api::register))
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state.clone());

    let user_routes = Router::new()
        .route("/api/auth/me", get(auth_api::me))
        .route("/api/users", get(auth_api::list_users))
        .route("/api/users/:id/role", put(auth_api::update_role))
        .with_state(auth_state.clone());

    let training_routes = Router::new()
        .route(
            "/api/training/exercises",
            get(training::list_exercises).post(training::create_exercise),
        )
        .route(
            "/api/training/exercises/:id/attempt",
            post(training::submit_attempt),
        )
        .with_state(training_state);

    let protected_routes = user_routes
        .merge(training_routes)
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

// ===== Public handlers =====

async fn root() -> &'static str {
    "API Eroz is running"
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
