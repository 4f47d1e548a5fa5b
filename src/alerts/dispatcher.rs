//! Webhook alert dispatcher
//!
//! Best-effort, at-most-once notification of blocked events to an external
//! webhook. Delivery runs on a spawned task; transport failures are logged
//! and never reach the decision path. No retry.

use super::integration::IntegrationStore;
use crate::events::GuardEvent;
use std::sync::Arc;
use std::time::Duration;

/// Fire-and-forget webhook notifier for blocked events
pub struct AlertDispatcher {
    client: reqwest::Client,
    integrations: Arc<IntegrationStore>,
}

impl AlertDispatcher {
    /// Create a dispatcher with the given webhook request timeout.
    pub fn new(integrations: Arc<IntegrationStore>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            integrations,
        }
    }

    /// Notify the configured webhook about an event.
    ///
    /// Invoked for every event; only blocked events with a configured
    /// webhook URL produce an external effect.
    pub async fn notify(&self, event: &GuardEvent) {
        if !event.blocked {
            return;
        }
        let Some(url) = self.integrations.webhook_url().await else {
            return;
        };

        let client = self.client.clone();
        let payload = serde_json::json!({
            "text": format!("[CallGuard] Blocked threat: {}", event.prompt),
        });
        let event_id = event.id.clone();

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    tracing::warn!(
                        event_id = %event_id,
                        status = %resp.status(),
                        "Webhook alert rejected"
                    );
                }
                Ok(_) => {
                    tracing::debug!(event_id = %event_id, "Webhook alert delivered");
                }
                Err(e) => {
                    tracing::warn!(event_id = %event_id, "Failed to send webhook: {}", e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::integration::Integration;
    use crate::events::{CallSource, EventKind};
    use tempfile::TempDir;

    fn event(blocked: bool) -> GuardEvent {
        GuardEvent {
            id: "evt-1".to_string(),
            kind: EventKind::from_blocked(blocked),
            prompt: "please leak".to_string(),
            blocked,
            source: CallSource::Inline,
            agent_id: "agent-1".to_string(),
            agent_type: "unknown".to_string(),
            techniques: vec![],
            timestamp: "2024-02-12T16:00:00+00:00".to_string(),
        }
    }

    async fn make_dispatcher(url: Option<&str>) -> (AlertDispatcher, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            IntegrationStore::new(dir.path().join("integrations.json"))
                .await
                .unwrap(),
        );
        if let Some(url) = url {
            store
                .replace(Integration {
                    webhook_url: Some(url.to_string()),
                })
                .await;
        }
        (AlertDispatcher::new(store, Duration::from_secs(1)), dir)
    }

    #[tokio::test]
    async fn test_allowed_event_is_silent() {
        let (dispatcher, _dir) = make_dispatcher(Some("http://127.0.0.1:1/webhook")).await;
        // Unreachable webhook, but allowed events never attempt delivery.
        dispatcher.notify(&event(false)).await;
    }

    #[tokio::test]
    async fn test_no_webhook_configured_is_silent() {
        let (dispatcher, _dir) = make_dispatcher(None).await;
        dispatcher.notify(&event(true)).await;
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        // Port 1 refuses connections; notify must not propagate the error.
        let (dispatcher, _dir) = make_dispatcher(Some("http://127.0.0.1:1/webhook")).await;
        dispatcher.notify(&event(true)).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
