use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::health;
use super::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/ask", post(handlers::ask))
        .route("/execute", post(handlers::execute))
        .route("/generate", post(handlers::generate))
        .route("/add", post(handlers::add))
        .route("/delete", post(handlers::delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
