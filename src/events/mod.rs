//! Events module — append-only audit log of policy decisions
//!
//! Every decision, allowed or blocked, is recorded here with full
//! attribution. The log is the system of record for the event feed, the
//! compliance CSV export, and the materialized per-agent counters.

pub mod compliance;
pub mod handler;
pub mod store;
pub mod types;

pub use handler::{events_router, EventsState};
pub use store::EventStore;
pub use types::{CallSource, EventDraft, EventKind, GuardEvent, UNKNOWN_AGENT};
