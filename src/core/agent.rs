//! The agent contract consumed by the mesh.
//!
//! The mesh treats agents as pure interfaces: it reads their declared
//! capabilities, hands them delegation tools at prepare time, and invokes
//! [`Agent::run`] blindly, propagating whatever comes back. Reasoning
//! loops, LLM backends, and streaming are the agent implementation's
//! business, not the mesh's.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::capability::Capability;
use super::context::ExecutionContext;
use super::tool::Tool;

/// Opaque error type returned by external agent implementations.
pub type AgentError = Box<dyn std::error::Error + Send + Sync>;

/// An executable entity identified by id, declaring the capabilities it
/// provides and the capabilities it needs from other agents.
#[async_trait]
pub trait Agent: Send + Sync + fmt::Debug {
    /// Stable unique identifier for the agent.
    fn id(&self) -> &str;

    /// Human-readable name. Defaults to the id.
    fn name(&self) -> &str {
        self.id()
    }

    /// What the agent does.
    fn description(&self) -> &str {
        ""
    }

    /// Capabilities this agent provides to the mesh.
    fn provides(&self) -> &[Capability] {
        &[]
    }

    /// Capabilities this agent needs resolved from other agents.
    fn needs(&self) -> &[Capability] {
        &[]
    }

    /// The tools currently attached to this agent.
    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        Vec::new()
    }

    /// Replace the agent's attached tool set.
    ///
    /// Called by the mesh on every prepare; the previous set is discarded.
    /// The default implementation ignores the tools, for agents that do
    /// not delegate.
    fn attach_tools(&self, _tools: Vec<Arc<dyn Tool>>) {}

    /// Execute the agent against the given input.
    async fn run(&self, ctx: &ExecutionContext, input: &str) -> Result<RunResult, AgentError>;
}

/// Token accounting for one execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Tokens consumed by prompts.
    pub input_tokens: u64,
    /// Tokens produced by completions.
    pub output_tokens: u64,
}

impl UsageMetrics {
    /// Accumulate usage from another execution.
    pub fn add(&mut self, other: &UsageMetrics) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// The outcome of one agent execution.
///
/// Owned by the agent that produced it; the mesh only reads it. Delegation
/// tools forward the output text alone — usage and metadata stay with the
/// producing agent's result and are aggregated, if at all, by whatever
/// composition layer sits above the mesh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunResult {
    /// The agent's output text.
    pub output: String,
    /// Free-form execution metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
    /// Token usage for this execution.
    #[serde(default)]
    pub usage: UsageMetrics,
    /// Wall-clock execution time.
    #[serde(default)]
    pub duration: Duration,
    /// Trace id correlating the invocation tree this run belonged to.
    pub trace_id: String,
    /// Snapshot of the call chain at completion.
    pub call_chain: Vec<String>,
}

impl RunResult {
    /// Create a result carrying only output text.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_metrics_accumulate() {
        let mut total = UsageMetrics::default();
        total.add(&UsageMetrics { input_tokens: 10, output_tokens: 5 });
        total.add(&UsageMetrics { input_tokens: 3, output_tokens: 7 });

        assert_eq!(total.input_tokens, 13);
        assert_eq!(total.output_tokens, 12);
    }

    #[test]
    fn test_run_result_round_trips_through_json() {
        let result = RunResult {
            output: "done".to_string(),
            trace_id: "trace-1".to_string(),
            call_chain: vec!["writer".to_string(), "researcher".to_string()],
            ..RunResult::default()
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: RunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.output, "done");
        assert_eq!(back.call_chain, vec!["writer", "researcher"]);
    }
}
