//! Integration tests for the gateway API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use wardmap_core::StatusStore;
use wardmap_db::SnapshotStore;
use wardmap_server::router::build_router;
use wardmap_server::state::AppState;
use wardmap_types::DistrictId;

/// State over three districts, persisting into a throwaway directory.
fn make_test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
    let store = StatusStore::with_defaults(["ward-a", "ward-b", "ward-c"].map(DistrictId::from));
    let snapshots = SnapshotStore::new(dir.path().join("status.json"));
    Arc::new(AppState::new(store, snapshots))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let dir = tempfile::tempdir().unwrap();
    let router = build_router(make_test_state(&dir));

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_get_district_status() {
    let dir = tempfile::tempdir().unwrap();
    let router = build_router(make_test_state(&dir));

    let response = router
        .oneshot(
            Request::get("/api/district-status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["ward-a"]["status"], "normal");
    assert_eq!(json["ward-a"]["color"], "#5698c3");
    assert_eq!(json.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_status_success() {
    let dir = tempfile::tempdir().unwrap();
    let state = make_test_state(&dir);
    let router = build_router(Arc::clone(&state));

    let body = serde_json::json!({"district": "ward-b", "status": "warning"});
    let response = router
        .oneshot(post_json("/api/update-status", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["district"], "ward-b");
    assert_eq!(json["status"], "warning");
    assert_eq!(json["color"], "#ffc107");

    // The mutation is visible to an immediate read.
    let districts = state.districts().await;
    assert_eq!(
        districts.get(&DistrictId::from("ward-b")).unwrap().color,
        "#ffc107"
    );
}

#[tokio::test]
async fn test_update_unknown_district_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = make_test_state(&dir);
    let router = build_router(Arc::clone(&state));

    let before = state.districts().await;

    let body = serde_json::json!({"district": "nonexistent", "status": "warning"});
    let response = router
        .oneshot(post_json("/api/update-status", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("district does not exist")
    );

    // Rejected mutations leave the mapping untouched.
    assert_eq!(state.districts().await, before);
}

#[tokio::test]
async fn test_update_invalid_status_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = make_test_state(&dir);
    let router = build_router(Arc::clone(&state));

    let before = state.districts().await;

    let body = serde_json::json!({"district": "ward-a", "status": "unknown-value"});
    let response = router
        .oneshot(post_json("/api/update-status", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("invalid status value")
    );

    assert_eq!(state.districts().await, before);
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let router = build_router(make_test_state(&dir));

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
