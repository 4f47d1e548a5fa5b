//! Agent registry types

use serde::{Deserialize, Serialize};

/// Agent lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Inactive,
}

/// Registered agent metadata.
///
/// `last_activity` and `threats_blocked` are a materialized view over the
/// event log — recomputable by replay, not an independent source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub agent_id: String,
    pub agent_type: String,
    /// RFC3339 UTC timestamp of the agent's most recent observed event
    pub last_activity: String,
    pub threats_blocked: u64,
    pub status: AgentStatus,
}

/// Request body for registering an agent
#[derive(Debug, Deserialize)]
pub struct RegisterAgentRequest {
    pub agent_id: String,
    #[serde(default)]
    pub agent_type: Option<String>,
}
