//! CallGuard - Runtime policy gate for autonomous agent LLM/tool calls
//!
//! CallGuard sits between an autonomous agent and its LLM or tool backend,
//! evaluates every call against a block-list policy, and either forwards it,
//! rejects it, or routes it through a mediating service.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Agent process                        │
//! │   agent.run(prompt) ──► Interception Layer                 │
//! │                          │ inline            │ proxy       │
//! │                          ▼                   ▼             │
//! │                   Decision Engine      HTTP POST /proxy ───┼──► CallGuard server
//! │                    allow / block                           │     (Decision Engine,
//! │                          │                                 │      same pipeline)
//! └──────────────────────────┼─────────────────────────────────┘
//!                            ▼
//!              Event Recorder + Alert Dispatcher
//!             (append-only audit log, webhook alerts)
//! ```
//!
//! Every decision, allowed or blocked, is appended to the audit log with
//! full attribution; blocked decisions additionally trigger a best-effort
//! webhook alert. Per-agent activity and threat counters are materialized
//! from the log on read.
//!
//! ## Modules
//!
//! - [`intercept`]: dual-mode wrapping of the agent call entrypoint
//! - [`policy`]: block-list storage, decision engine, technique inference
//! - [`guard`]: the shared evaluate-record-alert pipeline
//! - [`events`]: append-only audit log and compliance export
//! - [`agents`]: attribution registry with materialized counters
//! - [`alerts`]: webhook integration and threat notification
//! - [`api`]: unified HTTP router, including the proxy decision endpoint
//! - [`config`]: configuration management

pub mod agents;
pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod guard;
pub mod intercept;
pub mod policy;

pub use config::{GuardConfig, GuardMode};
pub use error::{Error, Result};
pub use guard::{CallRequest, GuardPipeline};
pub use intercept::{protect, Runnable};
