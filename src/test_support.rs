//! Test doubles standing in for external agent implementations.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::json;

use crate::core::{Agent, AgentError, Capability, ExecutionContext, RunResult, Tool};

/// How a [`StubAgent`] responds to `run`.
#[derive(Debug, Clone)]
enum Behavior {
    /// Return a fixed reply.
    Reply(String),
    /// Return the input verbatim.
    EchoInput,
    /// Return the call chain as seen by the agent, comma-joined.
    EchoChain,
    /// Fail with the given message.
    Fail(String),
    /// Invoke the first attached tool with the input as the task.
    DelegateThroughTools,
}

/// Scriptable agent used by the mesh tests in place of a real
/// reasoning-loop implementation.
#[derive(Debug)]
pub(crate) struct StubAgent {
    id: String,
    provides: Vec<Capability>,
    needs: Vec<Capability>,
    behavior: Behavior,
    tools: RwLock<Vec<Arc<dyn Tool>>>,
}

impl StubAgent {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            provides: Vec::new(),
            needs: Vec::new(),
            behavior: Behavior::Reply(format!("{id} output")),
            tools: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn provides(mut self, caps: &[&str]) -> Self {
        self.provides = caps.iter().copied().map(Capability::from).collect();
        self
    }

    pub(crate) fn needs(mut self, caps: &[&str]) -> Self {
        self.needs = caps.iter().copied().map(Capability::from).collect();
        self
    }

    pub(crate) fn reply(mut self, output: &str) -> Self {
        self.behavior = Behavior::Reply(output.to_string());
        self
    }

    pub(crate) fn echo_input(mut self) -> Self {
        self.behavior = Behavior::EchoInput;
        self
    }

    pub(crate) fn echo_chain(mut self) -> Self {
        self.behavior = Behavior::EchoChain;
        self
    }

    pub(crate) fn fail_with(mut self, message: &str) -> Self {
        self.behavior = Behavior::Fail(message.to_string());
        self
    }

    pub(crate) fn delegate_through_tools(mut self) -> Self {
        self.behavior = Behavior::DelegateThroughTools;
        self
    }

    fn result(&self, ctx: &ExecutionContext, output: String) -> RunResult {
        RunResult {
            output,
            trace_id: ctx.trace_id().to_string(),
            call_chain: ctx.call_chain().to_vec(),
            ..RunResult::default()
        }
    }
}

#[async_trait]
impl Agent for StubAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn provides(&self) -> &[Capability] {
        &self.provides
    }

    fn needs(&self) -> &[Capability] {
        &self.needs
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.read().clone()
    }

    fn attach_tools(&self, tools: Vec<Arc<dyn Tool>>) {
        *self.tools.write() = tools;
    }

    async fn run(&self, ctx: &ExecutionContext, input: &str) -> Result<RunResult, AgentError> {
        match &self.behavior {
            Behavior::Reply(output) => Ok(self.result(ctx, output.clone())),
            Behavior::EchoInput => Ok(self.result(ctx, input.to_string())),
            Behavior::EchoChain => Ok(self.result(ctx, ctx.call_chain().join(","))),
            Behavior::Fail(message) => Err(message.clone().into()),
            Behavior::DelegateThroughTools => {
                let tool = self
                    .tools()
                    .into_iter()
                    .next()
                    .ok_or_else(|| AgentError::from("no tools attached"))?;
                let output = tool
                    .execute(ctx, json!({ "task": input }))
                    .await
                    .map_err(|e| Box::new(e) as AgentError)?;
                Ok(self.result(ctx, output))
            }
        }
    }
}
