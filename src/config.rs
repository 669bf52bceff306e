//! Mesh configuration.
//!
//! The mesh consumes two settings: the hop budget and the selection
//! policy. Both can be parsed from a YAML fragment such as
//!
//! ```yaml
//! max_hops: 10
//! balancer: round-robin
//! ```
//!
//! and turned into a configured [`Mesh`] with [`MeshConfig::build`].

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::{
    Balancer, FirstBalancer, Mesh, RandomBalancer, RoundRobinBalancer, DEFAULT_MAX_HOPS,
};

/// Errors from loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration did not parse as valid YAML for [`MeshConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Selection policy choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalancerKind {
    /// Distribute delegations evenly across providers.
    #[default]
    RoundRobin,
    /// Pick a provider uniformly at random.
    Random,
    /// Always pick the first provider.
    First,
}

impl BalancerKind {
    fn build(self) -> Arc<dyn Balancer> {
        match self {
            BalancerKind::RoundRobin => Arc::new(RoundRobinBalancer::new()),
            BalancerKind::Random => Arc::new(RandomBalancer::new()),
            BalancerKind::First => Arc::new(FirstBalancer::new()),
        }
    }
}

/// Configuration surface consumed by the mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Maximum delegation depth. Non-positive values fall back to
    /// [`DEFAULT_MAX_HOPS`] at build time; this is a clamp, not an error.
    pub max_hops: i64,
    /// Provider-selection policy.
    pub balancer: BalancerKind,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            max_hops: i64::from(DEFAULT_MAX_HOPS),
            balancer: BalancerKind::default(),
        }
    }
}

impl MeshConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// The hop budget after clamping: non-positive values fall back to the
    /// default, values beyond `u32::MAX` saturate rather than shrink.
    pub fn effective_max_hops(&self) -> u32 {
        if self.max_hops <= 0 {
            DEFAULT_MAX_HOPS
        } else {
            u32::try_from(self.max_hops).unwrap_or(u32::MAX)
        }
    }

    /// Build a mesh from this configuration.
    pub fn build(&self) -> Mesh {
        Mesh::builder()
            .with_max_hops(self.effective_max_hops())
            .with_balancer(self.balancer.build())
            .build()
    }
}
