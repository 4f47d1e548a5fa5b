//! Interception layer — wrapping an agent's call entrypoint
//!
//! Agents expose their LLM/tool call through the [`Runnable`] trait. At setup
//! time, [`protect`] wraps that entrypoint once, irreversibly for the
//! session, in one of two modes:
//!
//! - **inline**: evaluation runs in-process before the original entrypoint;
//!   a blocked call fails with [`crate::Error::PolicyBlocked`] and the
//!   original is never invoked.
//! - **proxy**: the call is routed to a remote decision endpoint over HTTP;
//!   the remote's result fully replaces local execution.
//!
//! The mode is an environment decision (`CALLGUARD_MODE`), made once.

pub mod inline;
pub mod proxy;

use crate::config::{GuardMode, ProxyConfig};
use crate::guard::{CallRequest, GuardPipeline};
use crate::Result;
use async_trait::async_trait;

pub use inline::InlineGuard;
pub use proxy::ProxyGuard;

/// An agent call entrypoint.
///
/// Anything that can take a prompt and produce a result. Guards implement
/// this trait themselves, so a wrapped agent is used exactly like an
/// unwrapped one — the caller cannot tell evaluation occurred.
#[async_trait]
pub trait Runnable: Send + Sync {
    async fn run(&self, call: CallRequest) -> Result<String>;
}

/// Wrap an agent's entrypoint according to the mode from the environment.
///
/// In proxy mode the agent itself is discarded: every call is answered by
/// the remote mediator and the local entrypoint is never invoked.
pub fn protect<R: Runnable + 'static>(
    agent: R,
    pipeline: GuardPipeline,
    proxy_config: &ProxyConfig,
) -> Box<dyn Runnable> {
    match GuardMode::from_env() {
        GuardMode::Inline => {
            tracing::info!("Agent entrypoint guarded (inline mode)");
            Box::new(InlineGuard::new(agent, pipeline))
        }
        GuardMode::Proxy => {
            tracing::info!(endpoint = %proxy_config.endpoint, "Agent entrypoint guarded (proxy mode)");
            Box::new(ProxyGuard::new(proxy_config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertDispatcher, IntegrationStore};
    use crate::events::EventStore;
    use crate::policy::PolicyStore;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn make_pipeline() -> (GuardPipeline, TempDir) {
        let dir = TempDir::new().unwrap();
        let policy = Arc::new(
            PolicyStore::new(dir.path().join("policy.json"))
                .await
                .unwrap(),
        );
        let events = Arc::new(
            EventStore::new(dir.path().join("events.jsonl"))
                .await
                .unwrap(),
        );
        let integrations = Arc::new(
            IntegrationStore::new(dir.path().join("integrations.json"))
                .await
                .unwrap(),
        );
        let alerts = Arc::new(AlertDispatcher::new(integrations, Duration::from_secs(1)));
        (GuardPipeline::new(policy, events, alerts), dir)
    }

    // Single test for both env settings: mode resolution reads the process
    // environment, so splitting this would race under parallel test runs.
    #[tokio::test]
    async fn test_protect_mode_selection() {
        let (pipeline, _dir) = make_pipeline().await;
        let config = ProxyConfig::default();

        std::env::remove_var("CALLGUARD_MODE");
        assert_eq!(GuardMode::from_env(), GuardMode::Inline);
        let guarded = protect(
            testing::StubAgent::returning("42"),
            pipeline.clone(),
            &config,
        );
        let result = guarded.run(CallRequest::new("compute")).await.unwrap();
        assert_eq!(result, "42");

        std::env::set_var("CALLGUARD_MODE", "proxy");
        assert_eq!(GuardMode::from_env(), GuardMode::Proxy);
        std::env::remove_var("CALLGUARD_MODE");
    }
}
