//! Core contracts of the delegation mesh.
//!
//! Everything the mesh shares with the outside world lives here: the
//! capability identity, the immutable execution context, the agent and
//! tool traits, result payloads, and the error taxonomy.

pub mod agent;
pub mod capability;
pub mod context;
pub mod errors;
pub mod tool;

pub use agent::{Agent, AgentError, RunResult, UsageMetrics};
pub use capability::{Capability, CapabilitySet};
pub use context::ExecutionContext;
pub use errors::MeshError;
pub use tool::Tool;
