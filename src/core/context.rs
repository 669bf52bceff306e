//! Execution context propagation.
//!
//! An [`ExecutionContext`] travels with every delegation: the trace id
//! correlating one top-level invocation, the ordered chain of agent ids
//! visited so far, and the hop count. It is a pure value — extending it
//! produces a new context and never touches the original, so concurrent
//! delegation branches that fork from the same ancestor cannot observe
//! each other's extensions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable per-invocation execution state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    trace_id: String,
    call_chain: Vec<String>,
    hop_count: u32,
}

impl ExecutionContext {
    /// Create a fresh context with an empty call chain and no trace id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trace id, consuming the context.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Return a context that is guaranteed to carry a trace id.
    ///
    /// When the trace id is already set the context is returned unchanged;
    /// otherwise a copy with a freshly minted uuid is returned.
    pub fn ensured_trace_id(&self) -> Self {
        if !self.trace_id.is_empty() {
            return self.clone();
        }
        self.clone().with_trace_id(Uuid::new_v4().to_string())
    }

    /// The trace id correlating this invocation tree. Empty when unset.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// The ordered chain of agent ids visited so far, root first.
    pub fn call_chain(&self) -> &[String] {
        &self.call_chain
    }

    /// The number of chain extensions performed so far.
    pub fn hop_count(&self) -> u32 {
        self.hop_count
    }

    /// Whether the agent id already appears anywhere on the call chain.
    pub fn contains(&self, agent_id: &str) -> bool {
        self.call_chain.iter().any(|id| id == agent_id)
    }

    /// Return a new context with `agent_id` appended to the call chain and
    /// the hop count incremented. The receiver is left untouched; callers
    /// may keep using it for sibling branches.
    pub fn extended(&self, agent_id: impl Into<String>) -> Self {
        let mut chain = Vec::with_capacity(self.call_chain.len() + 1);
        chain.extend_from_slice(&self.call_chain);
        chain.push(agent_id.into());
        Self {
            trace_id: self.trace_id.clone(),
            call_chain: chain,
            hop_count: self.hop_count + 1,
        }
    }
}
