//! Axum router construction for the gateway API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the gateway server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/status` -- `WebSocket` realtime status channel
/// - `GET /api/district-status` -- full district mapping
/// - `POST /api/update-status` -- submit a status mutation
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/status", get(ws::ws_status))
        // REST API
        .route("/api/district-status", get(handlers::get_district_status))
        .route("/api/update-status", post(handlers::update_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
