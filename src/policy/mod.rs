//! Policy module — block-list storage, decision engine, technique inference
//!
//! The decision engine is the single place where a call is judged: a prompt
//! is blocked when a configured keyword (or the built-in baseline rule)
//! matches as a case-insensitive substring. Technique inference runs
//! alongside and tags each prompt with heuristic threat classifications.

pub mod engine;
pub mod handler;
pub mod store;
pub mod techniques;
pub mod types;

pub use engine::{evaluate, Verdict};
pub use handler::{policy_router, PolicyState};
pub use store::PolicyStore;
pub use techniques::infer;
pub use types::Policy;
