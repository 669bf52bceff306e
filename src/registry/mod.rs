//! Agent discovery and registration.
//!
//! The registry answers "who provides capability X". It is the one piece
//! of shared mutable state in the mesh besides the round-robin counter,
//! and the only place agents are stored. Registration has no implicit
//! expiry: entries live until deregistered or replaced.

mod local;

use std::sync::Arc;

use crate::core::{Agent, Capability, MeshError};

pub use local::LocalRegistry;

/// Store of known agents and their declared capabilities.
pub trait Registry: Send + Sync {
    /// Add an agent. Registering an id that already exists replaces the
    /// previous agent — an update, not an error.
    fn register(&self, agent: Arc<dyn Agent>) -> Result<(), MeshError>;

    /// Remove an agent. Returns whether an agent was actually removed.
    fn deregister(&self, agent_id: &str) -> bool;

    /// Retrieve an agent by id.
    fn get(&self, agent_id: &str) -> Result<Arc<dyn Agent>, MeshError>;

    /// All agents whose `provides` contains the capability, exact match.
    fn find_by_capability(&self, cap: &Capability) -> Vec<Arc<dyn Agent>>;

    /// All registered agents.
    fn list(&self) -> Vec<Arc<dyn Agent>>;
}
