//! HTTP handlers for the Agent Registry API
//!
//! - POST /agents/register — create or overwrite an agent record
//! - GET  /agents          — list records with freshly materialized counters

use super::registry::AgentRegistry;
use super::types::RegisterAgentRequest;
use crate::events::EventStore;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Shared state for agent handlers
#[derive(Clone)]
pub struct AgentsState {
    pub registry: Arc<AgentRegistry>,
    pub events: Arc<EventStore>,
}

/// Create the agents router
pub fn agents_router(state: AgentsState) -> Router {
    Router::new()
        .route("/agents/register", post(register_agent))
        .route("/agents", get(list_agents))
        .with_state(state)
}

/// POST /agents/register
async fn register_agent(
    State(state): State<AgentsState>,
    Json(req): Json<RegisterAgentRequest>,
) -> impl IntoResponse {
    tracing::info!(agent_id = %req.agent_id, "Registering agent");
    let record = state
        .registry
        .register(&req.agent_id, req.agent_type.as_deref())
        .await;
    Json(serde_json::json!({"status": "ok", "agent": record}))
}

/// GET /agents
async fn list_agents(State(state): State<AgentsState>) -> impl IntoResponse {
    let events = state.events.all().await;
    let view = state.registry.materialize(&events).await;
    let agents: Vec<_> = view.into_values().collect();
    Json(serde_json::json!({ "agents": agents }))
}
