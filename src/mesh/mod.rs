//! The mesh facade.
//!
//! Owns one registry, one selection policy, one cycle/hop guard, and one
//! injector built from the three, and exposes the register/lookup surface
//! plus the two execution entry points. The mesh performs no I/O of its
//! own: every blocking point lives inside the external agent's `run`.

pub mod balancer;
pub mod cycle;
pub mod injector;

use std::sync::Arc;

use tracing::debug;

use crate::core::{Agent, Capability, ExecutionContext, MeshError, RunResult, Tool};
use crate::registry::{LocalRegistry, Registry};

pub use balancer::{Balancer, FirstBalancer, IndexSource, RandomBalancer, RoundRobinBalancer};
pub use cycle::{CycleDetector, DEFAULT_MAX_HOPS};
pub use injector::{DelegationTool, Injector};

/// Central coordinator for a network of delegating agents.
pub struct Mesh {
    registry: Arc<dyn Registry>,
    cycle_detector: CycleDetector,
    injector: Injector,
}

impl Mesh {
    /// Create a mesh with the default collaborators: a [`LocalRegistry`],
    /// a round-robin balancer, and a [`DEFAULT_MAX_HOPS`] hop budget.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a mesh.
    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    /// The configured hop budget.
    ///
    /// Every chain extension counts, including entering the root agent in
    /// [`run_agent`](Self::run_agent): a budget of N allows the root plus
    /// N − 1 delegations below it.
    pub fn max_hops(&self) -> u32 {
        self.cycle_detector.max_hops()
    }

    /// Register agents in order.
    ///
    /// Not transactional: the first failure aborts the call and agents
    /// registered before it stay registered.
    pub fn register(
        &self,
        agents: impl IntoIterator<Item = Arc<dyn Agent>>,
    ) -> Result<(), MeshError> {
        for agent in agents {
            self.registry.register(agent)?;
        }
        Ok(())
    }

    /// Remove an agent. Returns whether an agent was removed.
    pub fn deregister(&self, agent_id: &str) -> bool {
        self.registry.deregister(agent_id)
    }

    /// Retrieve an agent by id.
    pub fn get_agent(&self, agent_id: &str) -> Result<Arc<dyn Agent>, MeshError> {
        self.registry.get(agent_id)
    }

    /// All registered agents, in registration order.
    pub fn list_agents(&self) -> Vec<Arc<dyn Agent>> {
        self.registry.list()
    }

    /// All agents providing the capability, exact match.
    pub fn find_providers(&self, cap: &Capability) -> Vec<Arc<dyn Agent>> {
        self.registry.find_by_capability(cap)
    }

    /// Resolve the agent's needs against the registry's current contents
    /// and attach the resulting delegation tools to it, replacing any
    /// previously attached set. Resolution is fresh on every call, so
    /// registrations and deregistrations take effect on the next run.
    ///
    /// Returns the attached tools.
    pub fn prepare_agent(&self, agent: &dyn Agent) -> Vec<Arc<dyn Tool>> {
        let tools = self.injector.inject_tools(agent);
        debug!(agent_id = agent.id(), tools = tools.len(), "agent prepared");
        agent.attach_tools(tools.clone());
        tools
    }

    /// Execute a registered agent by id.
    ///
    /// Ensures the context carries a trace id, prepares the agent, and
    /// enters it: the agent's id is appended to the call chain (one hop)
    /// before `run`, so a delegation that resolves back to this agent is
    /// caught as a cycle.
    pub async fn run_agent(
        &self,
        ctx: &ExecutionContext,
        agent_id: &str,
        input: &str,
    ) -> Result<RunResult, MeshError> {
        let ctx = ctx.ensured_trace_id();
        let agent = self.get_agent(agent_id)?;
        self.prepare_agent(agent.as_ref());

        let ctx = self.cycle_detector.prepare_context(&ctx, agent.id());
        debug!(agent_id, trace_id = ctx.trace_id(), "running agent");

        agent
            .run(&ctx, input)
            .await
            .map_err(|source| MeshError::ProviderExecution {
                agent_id: agent.id().to_string(),
                source,
            })
    }

    /// Execute a task against an implicitly chosen agent.
    ///
    /// Selection is a deliberate placeholder: the first agent in
    /// registration order, with no task-to-capability matching. Callers
    /// needing real routing should use [`run_agent`](Self::run_agent)
    /// with an explicit id.
    pub async fn run(&self, ctx: &ExecutionContext, task: &str) -> Result<RunResult, MeshError> {
        let agent = self
            .list_agents()
            .into_iter()
            .next()
            .ok_or_else(|| MeshError::AgentNotFound {
                id: "(no agents registered)".to_string(),
            })?;
        self.run_agent(ctx, agent.id(), task).await
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures and builds a [`Mesh`].
pub struct MeshBuilder {
    registry: Arc<dyn Registry>,
    balancer: Arc<dyn Balancer>,
    max_hops: u32,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self {
            registry: Arc::new(LocalRegistry::new()),
            balancer: Arc::new(RoundRobinBalancer::new()),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl MeshBuilder {
    /// Set the hop budget. Zero falls back to [`DEFAULT_MAX_HOPS`].
    ///
    /// The budget counts chain extensions, and entering the root agent is
    /// the first one: configure `depth + 1` to allow delegation chains
    /// `depth` levels deep below the root.
    pub fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Set the provider-selection policy.
    pub fn with_balancer(mut self, balancer: Arc<dyn Balancer>) -> Self {
        self.balancer = balancer;
        self
    }

    /// Set a custom registry backend.
    pub fn with_registry(mut self, registry: Arc<dyn Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Build the mesh, wiring the injector to the chosen collaborators.
    pub fn build(self) -> Mesh {
        let cycle_detector = CycleDetector::new(self.max_hops);
        let injector = Injector::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.balancer),
            cycle_detector,
        );
        Mesh {
            registry: self.registry,
            cycle_detector,
            injector,
        }
    }
}
