//! Integration configuration store
//!
//! Single-slot webhook configuration, last-write-wins, mirrored to a JSON
//! document on disk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Alert integration configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// In-memory integration config backed by a JSON file
pub struct IntegrationStore {
    path: PathBuf,
    integration: Arc<RwLock<Integration>>,
}

impl IntegrationStore {
    /// Create a store at the given file path, loading any existing config.
    pub async fn new(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let integration = Self::load_from_disk(&path);
        Ok(Self {
            path,
            integration: Arc::new(RwLock::new(integration)),
        })
    }

    /// Current configuration snapshot.
    pub async fn current(&self) -> Integration {
        self.integration.read().await.clone()
    }

    /// Replace the configuration and persist it. Last write wins.
    pub async fn replace(&self, integration: Integration) {
        {
            let mut guard = self.integration.write().await;
            *guard = integration.clone();
        }
        self.persist(&integration);
    }

    /// Configured webhook URL, if any.
    pub async fn webhook_url(&self) -> Option<String> {
        self.integration.read().await.webhook_url.clone()
    }

    fn load_from_disk(path: &PathBuf) -> Integration {
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(integration) => integration,
                Err(e) => {
                    tracing::warn!("Failed to parse integrations {}: {}", path.display(), e);
                    Integration::default()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read integrations {}: {}", path.display(), e);
                }
                Integration::default()
            }
        }
    }

    /// Persist the configuration to disk (fire-and-forget)
    fn persist(&self, integration: &Integration) {
        let path = self.path.clone();
        let integration = integration.clone();
        tokio::spawn(async move {
            match serde_json::to_string_pretty(&integration) {
                Ok(json) => {
                    if let Err(e) = tokio::fs::write(&path, json).await {
                        tracing::warn!(
                            "Failed to persist integrations {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to serialize integrations: {}", e);
                }
            }
        });
    }
}
