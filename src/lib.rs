//! # agentmesh
//!
//! A capability-based delegation mesh for autonomous task-executing agents.
//!
//! Agents declare the capabilities they *provide* and the capabilities they
//! *need*. The mesh resolves needs to providers at prepare time, wraps each
//! resolvable provider in an invokable delegation tool, and governs the
//! resulting call graph so delegation chains always terminate: no agent is
//! re-entered on a single chain, and total chain depth is bounded by a
//! configurable hop budget.
//!
//! The crate is a single-process, in-memory coordination core. Agent
//! reasoning loops, LLM backends, wire protocols, persistence, and
//! observability middleware are external collaborators behind the
//! [`Agent`] and [`Tool`] traits.
//!
//! ```no_run
//! use agentmesh::{ExecutionContext, Mesh};
//!
//! # async fn example(researcher: std::sync::Arc<dyn agentmesh::Agent>) -> Result<(), agentmesh::MeshError> {
//! let mesh = Mesh::builder().with_max_hops(5).build();
//! mesh.register([researcher])?;
//! let result = mesh.run_agent(&ExecutionContext::new(), "researcher", "survey the field").await?;
//! println!("{}", result.output);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod mesh;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::config::{BalancerKind, ConfigError, MeshConfig};
pub use self::core::{
    Agent, AgentError, Capability, CapabilitySet, ExecutionContext, MeshError, RunResult, Tool,
    UsageMetrics,
};
pub use self::mesh::{
    Balancer, CycleDetector, DelegationTool, FirstBalancer, Injector, Mesh, MeshBuilder,
    RandomBalancer, RoundRobinBalancer, DEFAULT_MAX_HOPS,
};
pub use self::registry::{LocalRegistry, Registry};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
