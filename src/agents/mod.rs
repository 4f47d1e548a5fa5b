//! Agents module — attribution registry
//!
//! Maps agent identifiers to metadata. Activity timestamps and threat
//! counters are a materialized view recomputed from the event log on read.

pub mod handler;
pub mod registry;
pub mod types;

pub use handler::{agents_router, AgentsState};
pub use registry::AgentRegistry;
pub use types::{AgentRecord, AgentStatus, RegisterAgentRequest};
