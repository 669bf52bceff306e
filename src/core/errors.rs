//! Error taxonomy for the delegation mesh.
//!
//! Every failure surfaced at the mesh boundary is a distinct [`MeshError`]
//! variant so callers can branch on kind rather than message text. Cycle,
//! hop-budget, no-provider, and provider-execution failures are recoverable
//! at the delegation-tool level; the delegating agent's own loop decides
//! whether to retry, pick another tool, or give up. The mesh itself never
//! retries.

use thiserror::Error;

use super::capability::Capability;

/// Errors produced by the mesh core.
#[derive(Debug, Error)]
pub enum MeshError {
    /// No agent with the given id is registered.
    #[error("agent not found: {id}")]
    AgentNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The candidate agent already appears on the current call chain.
    #[error("delegation cycle detected: '{agent_id}' is already on the call chain")]
    CycleDetected {
        /// The agent whose entry would close the cycle.
        agent_id: String,
    },

    /// The call chain has reached the configured maximum depth.
    #[error("hop budget exceeded: {hops} hops used of {max_hops}")]
    HopBudgetExceeded {
        /// Hops used on the current chain.
        hops: u32,
        /// The configured budget.
        max_hops: u32,
    },

    /// The selection policy found no provider for the capability.
    #[error("no provider available for capability '{capability}'")]
    NoProviderAvailable {
        /// The capability the delegation tool is bound to.
        capability: Capability,
    },

    /// The selected provider's own run failed.
    #[error("provider '{agent_id}' failed: {source}")]
    ProviderExecution {
        /// The provider that failed.
        agent_id: String,
        /// The provider's error, propagated as-is.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Delegation tool parameters did not match the tool schema.
    #[error("invalid tool input: {0}")]
    InvalidToolInput(#[from] serde_json::Error),

    /// An agent could not be registered. Aborts the remaining batch.
    #[error("registration failed: {reason}")]
    Registration {
        /// Why the registration was rejected.
        reason: String,
    },
}
