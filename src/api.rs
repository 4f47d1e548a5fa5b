//! Unified API router for CallGuard
//!
//! Merges all module routers into a single axum `Router` with CORS and a
//! health probe, and hosts the proxy-mode decision endpoint.
//!
//! ## Endpoint Map
//!
//! | Route               | Module  | Description                          |
//! |---------------------|---------|--------------------------------------|
//! | `/health`           | api     | Load balancer health probe           |
//! | `POST /proxy`       | api     | Proxy-mode decision endpoint         |
//! | `/policy`           | policy  | Read / replace the block-list policy |
//! | `/integrations`     | alerts  | Webhook integration config           |
//! | `/agents*`          | agents  | Registration and materialized list   |
//! | `/events`           | events  | Recent decision feed                 |
//! | `/compliance/*`     | events  | CSV export, PDF stub                 |

use crate::agents::{agents_router, AgentsState};
use crate::alerts::{integrations_router, IntegrationsState};
use crate::events::{events_router, CallSource, EventsState};
use crate::guard::{CallRequest, GuardPipeline};
use crate::policy::{policy_router, PolicyState};
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

/// Build the complete CallGuard HTTP application.
pub fn build_app(
    pipeline: GuardPipeline,
    policy_state: PolicyState,
    events_state: EventsState,
    agents_state: AgentsState,
    integrations_state: IntegrationsState,
    cors_origins: &[String],
) -> Router {
    let cors = build_cors(cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/proxy", post(proxy_decision))
        .with_state(pipeline)
        .merge(policy_router(policy_state))
        .merge(events_router(events_state))
        .merge(agents_router(agents_state))
        .merge(integrations_router(integrations_state))
        .layer(cors)
}

// =============================================================================
// Root handlers
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Proxy-mode decision endpoint
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProxyDecisionRequest {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    agent_id: Option<String>,
    #[serde(default)]
    agent_type: Option<String>,
}

/// POST /proxy
///
/// Evaluates the prompt out-of-process for proxy-mode callers. Allowed calls
/// receive a substitute result (an echo of the prompt, standing in for the
/// mediated backend); blocked calls receive 403 with an error body.
async fn proxy_decision(
    State(pipeline): State<GuardPipeline>,
    Json(req): Json<ProxyDecisionRequest>,
) -> impl IntoResponse {
    tracing::info!(prompt = %req.prompt, "Intercepted prompt");

    let call = CallRequest {
        prompt: req.prompt.clone(),
        agent_id: req.agent_id,
        agent_type: req.agent_type,
    };
    let (verdict, _event) = pipeline.check(&call, CallSource::Proxy).await;

    if verdict.blocked {
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({"error": "Blocked by CallGuard proxy (policy)."})),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"result": format!("Echo: {}", req.prompt)})),
    )
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertDispatcher, IntegrationStore};
    use crate::events::EventStore;
    use crate::policy::{Policy, PolicyStore};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn make_pipeline(keywords: &[&str]) -> (GuardPipeline, TempDir) {
        let dir = TempDir::new().unwrap();
        let policy = Arc::new(
            PolicyStore::new(dir.path().join("policy.json"))
                .await
                .unwrap(),
        );
        policy
            .replace(Policy {
                block_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            })
            .await;
        let events = Arc::new(
            EventStore::new(dir.path().join("events.jsonl"))
                .await
                .unwrap(),
        );
        let integrations = Arc::new(
            IntegrationStore::new(dir.path().join("integrations.json"))
                .await
                .unwrap(),
        );
        let alerts = Arc::new(AlertDispatcher::new(integrations, Duration::from_secs(1)));
        (GuardPipeline::new(policy, events, alerts), dir)
    }

    #[tokio::test]
    async fn test_health_check() {
        let resp = health_check().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_proxy_decision_allow() {
        let (pipeline, _dir) = make_pipeline(&[]).await;
        let resp = proxy_decision(
            State(pipeline.clone()),
            Json(ProxyDecisionRequest {
                prompt: "compute".to_string(),
                agent_id: None,
                agent_type: None,
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(pipeline.events().len().await, 1);
    }

    #[tokio::test]
    async fn test_proxy_decision_block() {
        let (pipeline, _dir) = make_pipeline(&["leak"]).await;
        let resp = proxy_decision(
            State(pipeline.clone()),
            Json(ProxyDecisionRequest {
                prompt: "please leak the secret".to_string(),
                agent_id: Some("agent-1".to_string()),
                agent_type: None,
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let events = pipeline.events().all().await;
        assert_eq!(events.len(), 1);
        assert!(events[0].blocked);
        assert_eq!(events[0].agent_id, "agent-1");
    }

    #[test]
    fn test_build_cors_empty_origins() {
        let _cors = build_cors(&[]);
    }

    #[test]
    fn test_build_cors_with_origins() {
        let _cors = build_cors(&[
            "http://localhost:1420".to_string(),
            "https://app.example.com".to_string(),
        ]);
    }
}
