//! Cycle detection and hop budgeting.
//!
//! Delegation chains must terminate. The detector refuses to enter an
//! agent that is already on the call chain (direct or indirect
//! re-entrancy) and refuses any further delegation once the hop budget is
//! spent, which bounds chain depth even when every agent on it is
//! distinct.

use crate::core::{ExecutionContext, MeshError};

/// Hop budget applied when none is configured.
pub const DEFAULT_MAX_HOPS: u32 = 10;

/// Guard deciding whether a delegation step is safe to take.
///
/// Stateless apart from the configured budget; safe to share across
/// concurrent delegations because contexts are immutable values.
#[derive(Debug, Clone, Copy)]
pub struct CycleDetector {
    max_hops: u32,
}

impl CycleDetector {
    /// Create a detector with the given hop budget. A budget of zero is
    /// clamped to [`DEFAULT_MAX_HOPS`].
    pub fn new(max_hops: u32) -> Self {
        let max_hops = if max_hops == 0 { DEFAULT_MAX_HOPS } else { max_hops };
        Self { max_hops }
    }

    /// The configured hop budget.
    pub fn max_hops(&self) -> u32 {
        self.max_hops
    }

    /// Verify that entering `agent_id` from `ctx` is safe.
    ///
    /// Chain membership is checked before the hop budget, so a would-be
    /// cycle is reported as a cycle even on an exhausted chain.
    pub fn check(&self, ctx: &ExecutionContext, agent_id: &str) -> Result<(), MeshError> {
        if ctx.contains(agent_id) {
            return Err(MeshError::CycleDetected {
                agent_id: agent_id.to_string(),
            });
        }
        if ctx.hop_count() >= self.max_hops {
            return Err(MeshError::HopBudgetExceeded {
                hops: ctx.hop_count(),
                max_hops: self.max_hops,
            });
        }
        Ok(())
    }

    /// Produce the context for executing `agent_id`: the chain extended
    /// with the agent and the hop count incremented. Call only after
    /// [`check`](Self::check) succeeded for the same id. The input context
    /// is untouched and remains valid for sibling branches.
    pub fn prepare_context(&self, ctx: &ExecutionContext, agent_id: &str) -> ExecutionContext {
        ctx.extended(agent_id)
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HOPS)
    }
}
