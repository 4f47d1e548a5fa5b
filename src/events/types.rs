//! Event types for the audit log
//!
//! A `GuardEvent` is the immutable record of one policy decision. Wire format
//! uses snake_case keys; `kind` serializes as `type` to match the persisted
//! log format.

use serde::{Deserialize, Serialize};

/// Sentinel attribution for events whose caller supplied no agent identity.
pub const UNKNOWN_AGENT: &str = "unknown";

/// Event classification: a plain call, or a blocked threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Call,
    Threat,
}

impl EventKind {
    /// Classification derived from the verdict.
    pub fn from_blocked(blocked: bool) -> Self {
        if blocked {
            Self::Threat
        } else {
            Self::Call
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Threat => write!(f, "threat"),
        }
    }
}

/// Which interception mode produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallSource {
    Inline,
    Proxy,
}

impl std::fmt::Display for CallSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Proxy => write!(f, "proxy"),
        }
    }
}

/// A recorded policy decision. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub prompt: String,
    pub blocked: bool,
    pub source: CallSource,
    pub agent_id: String,
    pub agent_type: String,
    pub techniques: Vec<String>,
    /// RFC3339 UTC timestamp, assigned at append time
    pub timestamp: String,
}

impl GuardEvent {
    /// Field names in declaration order, used as the CSV export header.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "type",
        "prompt",
        "blocked",
        "source",
        "agent_id",
        "agent_type",
        "techniques",
        "timestamp",
    ];
}

/// Unattributed, untimestamped event data as produced by a decision site.
///
/// The event store fills in `id`, `timestamp`, and sentinel attribution when
/// the draft is appended, so every persisted event is fully attributed.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub prompt: String,
    pub blocked: bool,
    pub source: CallSource,
    pub agent_id: Option<String>,
    pub agent_type: Option<String>,
    pub techniques: Vec<String>,
}

impl EventDraft {
    pub fn new(prompt: impl Into<String>, blocked: bool, source: CallSource) -> Self {
        Self {
            prompt: prompt.into(),
            blocked,
            source,
            agent_id: None,
            agent_type: None,
            techniques: Vec::new(),
        }
    }

    pub fn with_techniques(mut self, techniques: Vec<String>) -> Self {
        self.techniques = techniques;
        self
    }

    pub fn with_attribution(
        mut self,
        agent_id: Option<String>,
        agent_type: Option<String>,
    ) -> Self {
        self.agent_id = agent_id;
        self.agent_type = agent_type;
        self
    }
}
