//! HTTP handlers for the Events and Compliance APIs
//!
//! - GET /events          — most recent 100 events, append order
//! - GET /compliance/csv  — full log as CSV attachment
//! - GET /compliance/pdf  — not implemented (501)

use super::compliance;
use super::store::EventStore;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Retrieval window for the event feed.
const EVENT_FEED_LIMIT: usize = 100;

/// Shared state for event handlers
#[derive(Clone)]
pub struct EventsState {
    pub store: Arc<EventStore>,
}

/// Create the events router
pub fn events_router(state: EventsState) -> Router {
    Router::new()
        .route("/events", get(list_events))
        .route("/compliance/csv", get(compliance_csv))
        .route("/compliance/pdf", get(compliance_pdf))
        .with_state(state)
}

/// GET /events
async fn list_events(State(state): State<EventsState>) -> impl IntoResponse {
    let events = state.store.recent(EVENT_FEED_LIMIT).await;
    Json(serde_json::json!({ "events": events }))
}

/// GET /compliance/csv
async fn compliance_csv(State(state): State<EventsState>) -> impl IntoResponse {
    let events = state.store.all().await;
    let body = compliance::render_csv(&events);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=callguard_compliance.csv",
            ),
        ],
        body,
    )
}

/// GET /compliance/pdf
async fn compliance_pdf() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(serde_json::json!({"error": "PDF export not implemented."})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{CallSource, EventDraft};
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn make_app() -> (Router, Arc<EventStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            EventStore::new(dir.path().join("events.jsonl"))
                .await
                .unwrap(),
        );
        let app = events_router(EventsState {
            store: store.clone(),
        });
        (app, store, dir)
    }

    async fn send_get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty_log() {
        let (app, _store, _dir) = make_app().await;

        let response = send_get(app, "/events").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["events"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_feed_window() {
        let (app, store, _dir) = make_app().await;
        for i in 0..105 {
            store
                .record(EventDraft::new(
                    format!("p-{}", i),
                    false,
                    CallSource::Proxy,
                ))
                .await;
        }

        let response = send_get(app, "/events").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        let events = json["events"].as_array().unwrap();
        assert_eq!(events.len(), 100);
        assert_eq!(events[0]["prompt"], "p-5");
        assert_eq!(events[99]["prompt"], "p-104");
    }

    #[tokio::test]
    async fn test_csv_empty_log() {
        let (app, _store, _dir) = make_app().await;

        let response = send_get(app, "/compliance/csv").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=callguard_compliance.csv"
        );
        assert_eq!(body_string(response).await, "No events found.");
    }

    #[tokio::test]
    async fn test_csv_includes_recorded_events() {
        let (app, store, _dir) = make_app().await;
        store
            .record(EventDraft::new("leak it", true, CallSource::Inline))
            .await;

        let response = send_get(app, "/compliance/csv").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        let mut lines = body.lines();
        assert_eq!(lines.next().unwrap(), "id,type,prompt,blocked,source,agent_id,agent_type,techniques,timestamp");
        assert!(lines.next().unwrap().contains("\"leak it\""));
    }

    #[tokio::test]
    async fn test_pdf_not_implemented() {
        let (app, _store, _dir) = make_app().await;

        let response = send_get(app, "/compliance/pdf").await;
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "PDF export not implemented.");
    }
}
