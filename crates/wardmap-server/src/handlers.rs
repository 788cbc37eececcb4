//! REST endpoint handlers for the gateway server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/district-status` | Full district -> record mapping |
//! | `POST` | `/api/update-status` | Submit a status mutation |

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use wardmap_types::{Audience, DistrictId, Status, StatusRecord};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/update-status`.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateStatusRequest {
    /// The district to mutate.
    pub district: String,
    /// The requested status, validated against the permitted values.
    pub status: String,
}

/// Success response for `POST /api/update-status`.
#[derive(Debug, serde::Serialize)]
pub struct UpdateStatusResponse {
    /// Always `true`; rejections use the error body instead.
    pub success: bool,
    /// The mutated district.
    pub district: DistrictId,
    /// Its new status.
    pub status: Status,
    /// The color derived from the new status.
    pub color: String,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing service status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (district_count, warning_count) = {
        let store = state.store.read().await;
        (store.len(), store.warning_count())
    };
    let viewers = state.hub.audience_count(Audience::Viewer).await;
    let operators = state.hub.audience_count(Audience::Operator).await;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Wardmap</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Wardmap</h1>
    <p class="subtitle">District status synchronization service</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Districts</div>
            <div class="value">{district_count}</div>
        </div>
        <div class="metric">
            <div class="label">Warnings</div>
            <div class="value">{warning_count}</div>
        </div>
        <div class="metric">
            <div class="label">Viewers</div>
            <div class="value">{viewers}</div>
        </div>
        <div class="metric">
            <div class="label">Operators</div>
            <div class="value">{operators}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li>GET <a href="/api/district-status">/api/district-status</a> -- Full district mapping</li>
        <li>POST /api/update-status -- Submit a status mutation</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/status</code> -- Realtime status channel</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/district-status -- full mapping
// ---------------------------------------------------------------------------

/// Return the full current district mapping. No side effects.
pub async fn get_district_status(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<DistrictId, StatusRecord>> {
    Json(state.districts().await)
}

// ---------------------------------------------------------------------------
// POST /api/update-status -- submit a mutation
// ---------------------------------------------------------------------------

/// Validate and apply one status mutation.
///
/// On success the new record has already been persisted (best-effort)
/// and broadcast to every viewer. On rejection nothing changed and the
/// response is a 400 with the human-readable reason.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let district = DistrictId::from(body.district);
    let record = state.apply_update(&district, &body.status).await?;

    Ok(Json(UpdateStatusResponse {
        success: true,
        district,
        status: record.status,
        color: record.color,
    }))
}
