/// Application routes configuration
use crate::handlers::{get_analytics, get_launch_detail, health, list_launches, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // List and detail views
        .route("/launches", get(list_launches))
        .route("/launches/:id", get(get_launch_detail))
        // Analytics view
        .route("/analytics", get(get_analytics))
        .with_state(state)
}
