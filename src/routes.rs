//! Router assembly: API routes under /api, root liveness, permissive CORS.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use tower_http::cors::CorsLayer;

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Recycling Centers API" }))
}

/// Center and category routes. Static segments (`nearby`, `search`) take
/// precedence over the `:center_id` capture.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/centers", get(handlers::centers::list))
        .route("/centers/nearby", get(handlers::centers::nearby))
        .route("/centers/search", get(handlers::centers::search))
        .route("/centers/:center_id", get(handlers::centers::read))
        .route("/waste-categories", get(handlers::categories::list))
        .with_state(state)
}

/// Full application router with CORS open to any origin, method, and header.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes(state))
        .layer(CorsLayer::very_permissive())
}
