//! Attribution registry with file-based JSON persistence
//!
//! Maps agent identifiers to metadata. Registration creates or overwrites a
//! record; the per-agent activity timestamp and threat counter are
//! materialized on demand by replaying the event log, so repeated replays of
//! the same log always yield the same view.

use super::types::{AgentRecord, AgentStatus};
use crate::events::{GuardEvent, UNKNOWN_AGENT};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory agent registry backed by a JSON file
pub struct AgentRegistry {
    path: PathBuf,
    agents: Arc<RwLock<BTreeMap<String, AgentRecord>>>,
}

impl AgentRegistry {
    /// Create a registry at the given file path, loading existing records.
    pub async fn new(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let agents = Self::load_from_disk(&path);
        Ok(Self {
            path,
            agents: Arc::new(RwLock::new(agents)),
        })
    }

    /// Register an agent, creating or overwriting its record.
    ///
    /// The record starts active with a zero threat counter and the current
    /// time as its activity timestamp; replay refreshes both from the log.
    pub async fn register(&self, agent_id: &str, agent_type: Option<&str>) -> AgentRecord {
        let record = AgentRecord {
            agent_id: agent_id.to_string(),
            agent_type: agent_type.unwrap_or(UNKNOWN_AGENT).to_string(),
            last_activity: chrono::Utc::now().to_rfc3339(),
            threats_blocked: 0,
            status: AgentStatus::Active,
        };

        {
            let mut agents = self.agents.write().await;
            agents.insert(record.agent_id.clone(), record.clone());
        }

        self.persist().await;
        record
    }

    /// Snapshot of the registered records as stored, without replay.
    pub async fn registered(&self) -> BTreeMap<String, AgentRecord> {
        self.agents.read().await.clone()
    }

    /// Materialize the per-agent view by replaying the event log.
    ///
    /// For each event attributed to a registered agent, `last_activity`
    /// advances to the event's timestamp and `threats_blocked` counts the
    /// blocked events. Events for unregistered ids are ignored. Read-only
    /// and idempotent over an unchanged log.
    pub async fn materialize(&self, events: &[GuardEvent]) -> BTreeMap<String, AgentRecord> {
        let mut view = self.agents.read().await.clone();

        for record in view.values_mut() {
            record.threats_blocked = 0;
        }

        for event in events {
            if let Some(record) = view.get_mut(&event.agent_id) {
                record.last_activity = event.timestamp.clone();
                if event.blocked {
                    record.threats_blocked += 1;
                }
            }
        }

        view
    }

    fn load_from_disk(path: &PathBuf) -> BTreeMap<String, AgentRecord> {
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(agents) => agents,
                Err(e) => {
                    tracing::warn!("Failed to parse agent registry {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read agent registry {}: {}", path.display(), e);
                }
                BTreeMap::new()
            }
        }
    }

    /// Persist the full registry to disk (fire-and-forget)
    async fn persist(&self) {
        let snapshot = self.agents.read().await.clone();
        let path = self.path.clone();
        tokio::spawn(async move {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => {
                    if let Err(e) = tokio::fs::write(&path, json).await {
                        tracing::warn!(
                            "Failed to persist agent registry {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to serialize agent registry: {}", e);
                }
            }
        });
    }
}
