//! Axum router configuration with middleware.
//!
//! The directory read API lives under `/api/v1/`; the form-posting web
//! surface (group mutation, membership toggles) is mounted at the root.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/groups", get(handlers::directory::list_groups))
        .route("/skills", get(handlers::directory::list_skills));

    Router::new()
        .nest("/api/v1", api_routes)
        // Web mutation surface (POST-only; other verbs get 405 from the router)
        .route("/groups", post(handlers::group::create_group))
        .route("/groups/{url}/edit", post(handlers::group::edit_group))
        .route("/groups/{id}/toggle", post(handlers::membership::toggle_group))
        .route("/skills/{url}/toggle", post(handlers::membership::toggle_skill))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
