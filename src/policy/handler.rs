//! HTTP handlers for the Policy API
//!
//! - GET  /policy — read the current policy
//! - POST /policy — replace the policy wholesale

use super::store::PolicyStore;
use super::types::Policy;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Shared state for policy handlers
#[derive(Clone)]
pub struct PolicyState {
    pub store: Arc<PolicyStore>,
}

/// Create the policy router
pub fn policy_router(state: PolicyState) -> Router {
    Router::new()
        .route("/policy", get(get_policy))
        .route("/policy", post(set_policy))
        .with_state(state)
}

/// GET /policy
async fn get_policy(State(state): State<PolicyState>) -> impl IntoResponse {
    Json(state.store.current().await)
}

/// POST /policy
async fn set_policy(
    State(state): State<PolicyState>,
    Json(policy): Json<Policy>,
) -> impl IntoResponse {
    tracing::info!(
        keywords = policy.block_keywords.len(),
        "Replacing block-list policy"
    );
    state.store.replace(policy.clone()).await;
    Json(serde_json::json!({"status": "ok", "policy": policy}))
}
