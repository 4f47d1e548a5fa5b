//! Policy store with file-based JSON persistence
//!
//! Holds the current block-list policy in memory behind a lock, mirrored to a
//! single JSON document on disk. The policy is replaced wholesale; readers
//! observe either the old or the new value, never a partial write.

use super::types::Policy;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory policy backed by a JSON file
pub struct PolicyStore {
    path: PathBuf,
    policy: Arc<RwLock<Policy>>,
}

impl PolicyStore {
    /// Create a store at the given file path, loading any existing policy.
    ///
    /// A missing or unparsable file yields the empty default policy.
    pub async fn new(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let policy = Self::load_from_disk(&path);
        Ok(Self {
            path,
            policy: Arc::new(RwLock::new(policy)),
        })
    }

    /// Current policy snapshot.
    pub async fn current(&self) -> Policy {
        self.policy.read().await.clone()
    }

    /// Replace the policy wholesale and persist the new value.
    pub async fn replace(&self, policy: Policy) {
        {
            let mut guard = self.policy.write().await;
            *guard = policy.clone();
        }
        self.persist(&policy);
    }

    fn load_from_disk(path: &PathBuf) -> Policy {
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(policy) => policy,
                Err(e) => {
                    tracing::warn!("Failed to parse policy {}: {}", path.display(), e);
                    Policy::default()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read policy {}: {}", path.display(), e);
                }
                Policy::default()
            }
        }
    }

    /// Persist the policy to disk (fire-and-forget)
    fn persist(&self, policy: &Policy) {
        let path = self.path.clone();
        let policy = policy.clone();
        tokio::spawn(async move {
            match serde_json::to_string_pretty(&policy) {
                Ok(json) => {
                    if let Err(e) = tokio::fs::write(&path, json).await {
                        tracing::warn!("Failed to persist policy {}: {}", path.display(), e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to serialize policy: {}", e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn make_store() -> (PolicyStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = PolicyStore::new(dir.path().join("policy.json"))
            .await
            .unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_empty_default() {
        let (store, _dir) = make_store().await;
        assert!(store.current().await.block_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_replace_wholesale() {
        let (store, _dir) = make_store().await;

        store
            .replace(Policy {
                block_keywords: vec!["leak".to_string(), "secret".to_string()],
            })
            .await;
        assert_eq!(store.current().await.block_keywords.len(), 2);

        // A second replace does not merge
        store
            .replace(Policy {
                block_keywords: vec!["exfiltrate".to_string()],
            })
            .await;
        assert_eq!(
            store.current().await.block_keywords,
            vec!["exfiltrate".to_string()]
        );
    }

    #[tokio::test]
    async fn test_persistence_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("policy.json");

        {
            let store = PolicyStore::new(path.clone()).await.unwrap();
            store
                .replace(Policy {
                    block_keywords: vec!["leak".to_string()],
                })
                .await;
            // Wait for async persistence
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        let store = PolicyStore::new(path).await.unwrap();
        assert_eq!(
            store.current().await.block_keywords,
            vec!["leak".to_string()]
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, "not valid json").unwrap();

        let store = PolicyStore::new(path).await.unwrap();
        assert!(store.current().await.block_keywords.is_empty());
    }
}
