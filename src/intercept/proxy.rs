//! Proxy-mode interception
//!
//! Replaces the agent's entrypoint with a network call to a remote decision
//! endpoint. The remote performs evaluation and, on allow, supplies the
//! substitute result — the local entrypoint is never invoked in this mode.
//!
//! Status mapping: 403 is the remote block signal and surfaces as
//! [`crate::Error::RemoteBlocked`]; any other non-success status, and any
//! transport failure, is a [`crate::Error::ProxyFailure`].

use super::Runnable;
use crate::config::ProxyConfig;
use crate::guard::CallRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wire request to the remote decision endpoint
#[derive(Debug, Serialize)]
pub struct ProxyRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
}

/// Wire response on allow
#[derive(Debug, Deserialize)]
struct ProxyResponse {
    result: String,
}

/// Wire response on block or failure
#[derive(Debug, Deserialize)]
struct ProxyErrorResponse {
    error: String,
}

/// Remote-mediated guard: calls are answered by the decision endpoint
pub struct ProxyGuard {
    client: reqwest::Client,
    endpoint: String,
}

impl ProxyGuard {
    /// Create a proxy guard against the configured endpoint.
    pub fn new(config: &ProxyConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl Runnable for ProxyGuard {
    async fn run(&self, call: CallRequest) -> Result<String> {
        tracing::debug!(prompt = %call.prompt, "Routing call via proxy");

        let request = ProxyRequest {
            prompt: call.prompt,
            agent_id: call.agent_id,
            agent_type: call.agent_type,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::ProxyFailure(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            let body: ProxyResponse = resp
                .json()
                .await
                .map_err(|e| Error::ProxyFailure(format!("invalid proxy response: {}", e)))?;
            return Ok(body.result);
        }

        let message = match resp.json::<ProxyErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("proxy returned status {}", status),
        };

        if status == StatusCode::FORBIDDEN {
            Err(Error::RemoteBlocked(message))
        } else {
            Err(Error::ProxyFailure(message))
        }
    }
}
