//! Guard pipeline — evaluate, record, alert
//!
//! Shared by both decision sites: the inline interceptor and the proxy-mode
//! HTTP endpoint both funnel every call through [`GuardPipeline::check`],
//! which produces the verdict and takes care of audit recording and alert
//! dispatch regardless of the outcome.

use crate::alerts::AlertDispatcher;
use crate::events::{CallSource, EventDraft, EventStore, GuardEvent};
use crate::policy::{engine, PolicyStore, Verdict};
use std::sync::Arc;

/// A single intercepted call, as seen by a decision site.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub prompt: String,
    pub agent_id: Option<String>,
    pub agent_type: Option<String>,
}

impl CallRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            agent_id: None,
            agent_type: None,
        }
    }

    pub fn attributed(
        prompt: impl Into<String>,
        agent_id: impl Into<String>,
        agent_type: Option<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            agent_id: Some(agent_id.into()),
            agent_type,
        }
    }
}

/// The decision core: policy evaluation plus the audit/alert side effects.
#[derive(Clone)]
pub struct GuardPipeline {
    policy: Arc<PolicyStore>,
    events: Arc<EventStore>,
    alerts: Arc<AlertDispatcher>,
}

impl GuardPipeline {
    pub fn new(
        policy: Arc<PolicyStore>,
        events: Arc<EventStore>,
        alerts: Arc<AlertDispatcher>,
    ) -> Self {
        Self {
            policy,
            events,
            alerts,
        }
    }

    /// Evaluate a call and record the decision.
    ///
    /// The event is appended and the alert dispatched for every call,
    /// allowed or blocked. Recording failures never affect the verdict.
    pub async fn check(&self, call: &CallRequest, source: CallSource) -> (Verdict, GuardEvent) {
        let policy = self.policy.current().await;
        let verdict = engine::evaluate(&call.prompt, &policy);

        if verdict.blocked {
            tracing::warn!(
                source = %source,
                agent_id = call.agent_id.as_deref().unwrap_or("unknown"),
                "Threat detected: blocking call"
            );
        } else {
            tracing::debug!(source = %source, "Call allowed");
        }

        let event = self
            .events
            .record(
                EventDraft::new(call.prompt.clone(), verdict.blocked, source)
                    .with_techniques(verdict.techniques.clone())
                    .with_attribution(call.agent_id.clone(), call.agent_type.clone()),
            )
            .await;

        self.alerts.notify(&event).await;

        (verdict, event)
    }

    pub fn events(&self) -> &Arc<EventStore> {
        &self.events
    }
}
