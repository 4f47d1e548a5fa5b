//! Policy decision engine
//!
//! The single point where "is this call dangerous" is decided. A prompt is
//! blocked when any configured keyword occurs as a case-insensitive substring,
//! or when the built-in baseline rule fires.

use super::techniques;
use super::types::Policy;
use serde::{Deserialize, Serialize};

/// Baseline rule: the literal substring `"block"` always blocks, independent
/// of policy content. Not part of the configurable keyword set and cannot be
/// disabled.
const BASELINE_KEYWORD: &str = "block";

/// Outcome of evaluating one prompt against the current policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the call must be rejected
    pub blocked: bool,
    /// Inferred technique tags (informational, independent of the verdict)
    pub techniques: Vec<String>,
}

/// Evaluate a prompt against a policy.
///
/// Pure function of its inputs: no side effects, the policy is read, not
/// mutated. Technique tags are computed regardless of the verdict — an
/// allowed call can still carry tags, and a blocked call's tags are
/// informational rather than the cause of the block.
pub fn evaluate(prompt: &str, policy: &Policy) -> Verdict {
    let prompt_lower = prompt.to_lowercase();

    let blocked = prompt_lower.contains(BASELINE_KEYWORD)
        || policy
            .block_keywords
            .iter()
            .any(|kw| prompt_lower.contains(&kw.to_lowercase()));

    Verdict {
        blocked,
        techniques: techniques::infer(prompt),
    }
}
