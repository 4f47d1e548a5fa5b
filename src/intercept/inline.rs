//! Inline-mode interception
//!
//! Wraps an agent's entrypoint so every invocation is evaluated in-process
//! before the original runs. A blocked call fails with
//! [`crate::Error::PolicyBlocked`] and the inner entrypoint is never
//! attempted — a hard gate, not a warning. Allowed calls delegate and return
//! the inner result unchanged.

use super::Runnable;
use crate::events::CallSource;
use crate::guard::{CallRequest, GuardPipeline};
use crate::{Error, Result};
use async_trait::async_trait;

/// In-process guard around an agent entrypoint
pub struct InlineGuard<R: Runnable> {
    inner: R,
    pipeline: GuardPipeline,
}

impl<R: Runnable> InlineGuard<R> {
    /// Wrap the given entrypoint. One-shot: there is no unwrapping.
    pub fn new(inner: R, pipeline: GuardPipeline) -> Self {
        Self { inner, pipeline }
    }
}

#[async_trait]
impl<R: Runnable> Runnable for InlineGuard<R> {
    async fn run(&self, call: CallRequest) -> Result<String> {
        tracing::debug!(prompt = %call.prompt, "Checking prompt");

        let (verdict, _event) = self.pipeline.check(&call, CallSource::Inline).await;
        if verdict.blocked {
            return Err(Error::PolicyBlocked(format!(
                "prompt rejected: {}",
                verdict.techniques.join(", ")
            )));
        }

        let result = self.inner.run(call).await?;
        tracing::debug!("Call completed");
        Ok(result)
    }
}
