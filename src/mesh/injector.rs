//! Delegation tool factory.
//!
//! Turns "agent B provides what agent A needs" into a tool agent A can
//! invoke. For each capability an agent needs, the injector resolves the
//! current providers from the registry and wraps them in a
//! [`DelegationTool`] parameterized by the selection policy and the
//! cycle/hop guard. Resolution happens fresh on every injection, so
//! registry changes take effect the next time an agent is prepared.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::trace;

use crate::core::{Agent, Capability, ExecutionContext, MeshError, Tool};
use crate::registry::Registry;

use super::balancer::Balancer;
use super::cycle::CycleDetector;

/// Builds delegation tools for agents from the registry's current state.
pub struct Injector {
    registry: Arc<dyn Registry>,
    balancer: Arc<dyn Balancer>,
    cycle_detector: CycleDetector,
}

impl Injector {
    /// Create an injector over the given collaborators.
    pub fn new(
        registry: Arc<dyn Registry>,
        balancer: Arc<dyn Balancer>,
        cycle_detector: CycleDetector,
    ) -> Self {
        Self {
            registry,
            balancer,
            cycle_detector,
        }
    }

    /// Build one delegation tool per satisfiable need of the agent.
    ///
    /// Needs are visited in declared order; duplicates collapse to a
    /// single tool since the tool's identity is the capability. A need
    /// with no current provider is skipped silently — the agent simply
    /// sees fewer delegation options.
    pub fn inject_tools(&self, agent: &dyn Agent) -> Vec<Arc<dyn Tool>> {
        let mut seen: HashSet<&Capability> = HashSet::new();
        let mut tools: Vec<Arc<dyn Tool>> = Vec::new();

        for need in agent.needs() {
            if !seen.insert(need) {
                continue;
            }

            let providers = self.registry.find_by_capability(need);
            if providers.is_empty() {
                trace!(capability = %need, agent_id = agent.id(), "no providers, skipping need");
                continue;
            }

            tools.push(Arc::new(DelegationTool::new(
                need.clone(),
                providers,
                Arc::clone(&self.balancer),
                self.cycle_detector,
            )));
        }

        tools
    }
}

/// Parameters accepted by a delegation tool.
#[derive(Debug, Deserialize)]
struct DelegationInput {
    /// The instruction to forward to the provider.
    task: String,
    /// Supplementary text, concatenated ahead of the task when present.
    #[serde(default)]
    context: Option<String>,
}

/// A callable wrapper that lets an agent invoke a provider of one needed
/// capability.
///
/// Immutable once constructed: the capability, the provider snapshot, the
/// policy, and the guard are fixed at injection time. Re-resolving
/// providers means injecting a new tool, which happens on every prepare.
#[derive(Debug)]
pub struct DelegationTool {
    capability: Capability,
    name: String,
    description: String,
    providers: Vec<Arc<dyn Agent>>,
    balancer: Arc<dyn Balancer>,
    cycle_detector: CycleDetector,
}

impl DelegationTool {
    pub(crate) fn new(
        capability: Capability,
        providers: Vec<Arc<dyn Agent>>,
        balancer: Arc<dyn Balancer>,
        cycle_detector: CycleDetector,
    ) -> Self {
        let name = format!("delegate_to_{capability}");
        let description = format!(
            "Delegate a task to a specialized agent that provides the '{capability}' \
             capability. Use this when you need expert help with {capability}-related \
             work. The agent processes your request and returns its result."
        );
        Self {
            capability,
            name,
            description,
            providers,
            balancer,
            cycle_detector,
        }
    }

    /// The capability this tool delegates.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }
}

#[async_trait]
impl Tool for DelegationTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task": {
                    "type": "string",
                    "description": "The specific task or question to delegate to the specialized agent"
                },
                "context": {
                    "type": "string",
                    "description": "Additional context that might help the agent understand the task better"
                }
            },
            "required": ["task"]
        })
    }

    async fn execute(&self, ctx: &ExecutionContext, params: Value) -> Result<String, MeshError> {
        let input: DelegationInput = serde_json::from_value(params)?;

        let provider =
            self.balancer
                .select(&self.providers)
                .ok_or_else(|| MeshError::NoProviderAvailable {
                    capability: self.capability.clone(),
                })?;

        self.cycle_detector.check(ctx, provider.id())?;
        let delegated_ctx = self.cycle_detector.prepare_context(ctx, provider.id());

        let full_input = match input.context.as_deref() {
            Some(extra) if !extra.is_empty() => {
                format!("Context: {extra}\n\nTask: {}", input.task)
            }
            _ => input.task,
        };

        trace!(
            tool = %self.name,
            provider = provider.id(),
            trace_id = delegated_ctx.trace_id(),
            hops = delegated_ctx.hop_count(),
            "delegating"
        );

        let result = provider
            .run(&delegated_ctx, &full_input)
            .await
            .map_err(|source| MeshError::ProviderExecution {
                agent_id: provider.id().to_string(),
                source,
            })?;

        // Only the output text crosses the tool boundary; usage and
        // metadata stay with the provider's own result.
        Ok(result.output)
    }
}
