//! Axum router configuration with middleware.
//!
//! Middleware: permissive CORS and request tracing. Rate limiting is not
//! middleware -- it is the first stage of the gateway pipeline, so a
//! rejected request never touches the cache or the store.

use axum::Router;
use axum::routing::{get, post};
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

    Router::new()
        .route("/", get(home))
        .route("/chat/", post(handlers::chat::chat))
        .route("/chat/{session_id}/history", get(handlers::chat::history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - liveness banner.
async fn home() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "Chatbot API is running!",
    }))
}
