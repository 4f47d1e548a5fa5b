//! HTTP handlers for the Integrations API
//!
//! - GET  /integrations — read the current integration config
//! - POST /integrations — set the webhook URL (400 when missing)

use super::integration::{Integration, IntegrationStore};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for integration handlers
#[derive(Clone)]
pub struct IntegrationsState {
    pub store: Arc<IntegrationStore>,
}

/// Create the integrations router
pub fn integrations_router(state: IntegrationsState) -> Router {
    Router::new()
        .route("/integrations", get(get_integration))
        .route("/integrations", post(set_integration))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SetIntegrationRequest {
    webhook_url: Option<String>,
}

/// GET /integrations
async fn get_integration(State(state): State<IntegrationsState>) -> impl IntoResponse {
    Json(state.store.current().await)
}

/// POST /integrations
async fn set_integration(
    State(state): State<IntegrationsState>,
    Json(req): Json<SetIntegrationRequest>,
) -> impl IntoResponse {
    let Some(url) = req.webhook_url.filter(|u| !u.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Missing webhook_url"})),
        );
    };

    tracing::info!(webhook_url = %url, "Updating alert webhook");
    state
        .store
        .replace(Integration {
            webhook_url: Some(url.clone()),
        })
        .await;

    (
        StatusCode::OK,
        Json(serde_json::json!({"status": "ok", "webhook_url": url})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn make_app() -> (Router, Arc<IntegrationStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            IntegrationStore::new(dir.path().join("integrations.json"))
                .await
                .unwrap(),
        );
        let app = integrations_router(IntegrationsState {
            store: store.clone(),
        });
        (app, store, dir)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn post_integration(
        app: &Router,
        body: serde_json::Value,
    ) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/integrations")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_url_rejected() {
        let (app, store, _dir) = make_app().await;

        let response = post_integration(&app, serde_json::json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing webhook_url");

        let response = post_integration(&app, serde_json::json!({"webhook_url": ""})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(store.webhook_url().await.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_url() {
        let (app, store, _dir) = make_app().await;

        let response = post_integration(
            &app,
            serde_json::json!({"webhook_url": "https://hooks.example.com/x"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/integrations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["webhook_url"], "https://hooks.example.com/x");

        assert_eq!(
            store.webhook_url().await.as_deref(),
            Some("https://hooks.example.com/x")
        );
    }
}
