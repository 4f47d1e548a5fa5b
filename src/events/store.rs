//! Append-only event log with JSON Lines persistence
//!
//! The system of record for audit and compliance views. Appends are
//! serialized under a write lock so append order equals temporal order;
//! timestamps are assigned inside the same critical section. Durable writes
//! go through a single writer task holding the file handle, fed by a
//! channel, so the on-disk log carries the same order as the in-memory one.
//! Persistence failures are logged and swallowed — audit-log unavailability
//! never blocks the decision path.

use super::types::{EventDraft, EventKind, GuardEvent, UNKNOWN_AGENT};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, RwLock};

/// In-memory event log backed by a JSONL file
pub struct EventStore {
    events: Arc<RwLock<Vec<GuardEvent>>>,
    append_tx: mpsc::UnboundedSender<String>,
}

impl EventStore {
    /// Create a store at the given file path, loading any existing log.
    ///
    /// Corrupt lines in the log are skipped with a warning.
    pub async fn new(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let events = Self::load_from_disk(&path);

        let (append_tx, append_rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::run_writer(path, append_rx));

        Ok(Self {
            events: Arc::new(RwLock::new(events)),
            append_tx,
        })
    }

    /// Append a decision record to the log.
    ///
    /// Assigns the id and timestamp at append time and fills sentinel
    /// attribution for callers that supplied none. The durable line is
    /// enqueued inside the same critical section that orders the in-memory
    /// log, so disk order matches append order. Never fails observably.
    pub async fn record(&self, draft: EventDraft) -> GuardEvent {
        let mut events = self.events.write().await;

        let event = GuardEvent {
            id: format!("evt-{}", uuid::Uuid::new_v4()),
            kind: EventKind::from_blocked(draft.blocked),
            prompt: draft.prompt,
            blocked: draft.blocked,
            source: draft.source,
            agent_id: draft.agent_id.unwrap_or_else(|| UNKNOWN_AGENT.to_string()),
            agent_type: draft
                .agent_type
                .unwrap_or_else(|| UNKNOWN_AGENT.to_string()),
            techniques: draft.techniques,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        events.push(event.clone());

        match serde_json::to_string(&event) {
            Ok(mut line) => {
                line.push('\n');
                if self.append_tx.send(line).is_err() {
                    tracing::warn!("Event log writer stopped; event {} not persisted", event.id);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize event {}: {}", event.id, e);
            }
        }

        drop(events);
        event
    }

    /// The most recent `limit` events, in append order.
    pub async fn recent(&self, limit: usize) -> Vec<GuardEvent> {
        let events = self.events.read().await;
        let start = events.len().saturating_sub(limit);
        events[start..].to_vec()
    }

    /// Full log snapshot, in append order.
    pub async fn all(&self) -> Vec<GuardEvent> {
        self.events.read().await.clone()
    }

    /// Number of recorded events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether the log is empty.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    fn load_from_disk(path: &PathBuf) -> Vec<GuardEvent> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read event log {}: {}", path.display(), e);
                }
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        for line in data.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::warn!("Skipping corrupt event log line: {}", e);
                }
            }
        }
        events
    }

    /// Single-writer append loop: owns the file handle for the store's
    /// lifetime and drains queued lines in channel order. Exits when the
    /// store (and with it the sender) is dropped.
    async fn run_writer(path: PathBuf, mut append_rx: mpsc::UnboundedReceiver<String>) {
        let mut file = match tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
        {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!("Failed to open event log {}: {}", path.display(), e);
                None
            }
        };

        while let Some(line) = append_rx.recv().await {
            let Some(file) = file.as_mut() else {
                continue;
            };
            if let Err(e) = file.write_all(line.as_bytes()).await {
                tracing::warn!("Failed to persist event to {}: {}", path.display(), e);
            }
        }
    }
}
