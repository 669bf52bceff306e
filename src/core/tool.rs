//! The tool contract produced by the mesh.
//!
//! A tool is a named, schema-described callable an agent can invoke during
//! its reasoning loop. The mesh produces delegation tools satisfying this
//! trait; agent implementations may attach others of their own.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::context::ExecutionContext;
use super::errors::MeshError;

/// A callable unit exposed to an agent.
#[async_trait]
pub trait Tool: Send + Sync + fmt::Debug {
    /// The tool's unique name.
    fn name(&self) -> &str;

    /// Description telling the invoking agent how and when to use the tool.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn schema(&self) -> Value {
        Value::Object(serde_json::Map::new())
    }

    /// Execute the tool with the caller's execution context and parameters.
    async fn execute(&self, ctx: &ExecutionContext, params: Value) -> Result<String, MeshError>;
}
