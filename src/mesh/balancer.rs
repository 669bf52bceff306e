//! Provider selection policies.
//!
//! Given the providers resolved for a capability, a balancer picks the one
//! to delegate to. Selection never fails: an empty candidate list yields
//! `None` and the caller reports "no provider available".

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::core::Agent;

/// Strategy for choosing one provider among the resolved candidates.
pub trait Balancer: Send + Sync + fmt::Debug {
    /// Pick one agent, or `None` when there are no candidates.
    fn select(&self, candidates: &[Arc<dyn Agent>]) -> Option<Arc<dyn Agent>>;
}

/// Distributes delegations evenly across providers.
///
/// One shared counter, bumped atomically on every call — this sits on the
/// hot path of every delegation, so it must not take a lock. The index is
/// taken modulo the *current* candidate count: when the provider set
/// changes size between calls, fairness is approximate; for a stable set
/// of size N, N consecutive calls return each provider exactly once.
#[derive(Debug, Default)]
pub struct RoundRobinBalancer {
    counter: AtomicU64,
}

impl RoundRobinBalancer {
    /// Create a balancer with the counter at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Balancer for RoundRobinBalancer {
    fn select(&self, candidates: &[Arc<dyn Agent>]) -> Option<Arc<dyn Agent>> {
        if candidates.is_empty() {
            return None;
        }
        let idx = self.counter.fetch_add(1, Ordering::Relaxed);
        Some(Arc::clone(&candidates[(idx % candidates.len() as u64) as usize]))
    }
}

/// Index source for [`RandomBalancer`]: maps a candidate count `n > 0` to
/// an index in `0..n`.
pub type IndexSource = Box<dyn Fn(usize) -> usize + Send + Sync>;

/// Selects a provider uniformly at random.
///
/// The randomness source is injected so selection is reproducible in
/// tests; [`RandomBalancer::new`] installs a source backed by uuid v4
/// entropy.
pub struct RandomBalancer {
    source: IndexSource,
}

impl RandomBalancer {
    /// Create a balancer drawing indices from OS entropy.
    pub fn new() -> Self {
        Self::with_source(Box::new(|n| {
            (Uuid::new_v4().as_u128() % n as u128) as usize
        }))
    }

    /// Create a balancer with an injected index source.
    pub fn with_source(source: IndexSource) -> Self {
        Self { source }
    }
}

impl Default for RandomBalancer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomBalancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomBalancer").finish_non_exhaustive()
    }
}

impl Balancer for RandomBalancer {
    fn select(&self, candidates: &[Arc<dyn Agent>]) -> Option<Arc<dyn Agent>> {
        if candidates.is_empty() {
            return None;
        }
        let idx = (self.source)(candidates.len()) % candidates.len();
        Some(Arc::clone(&candidates[idx]))
    }
}

/// Always selects the first candidate. Deterministic; useful in tests and
/// as a trivial default.
#[derive(Debug, Default)]
pub struct FirstBalancer;

impl FirstBalancer {
    /// Create the balancer.
    pub fn new() -> Self {
        Self
    }
}

impl Balancer for FirstBalancer {
    fn select(&self, candidates: &[Arc<dyn Agent>]) -> Option<Arc<dyn Agent>> {
        candidates.first().cloned()
    }
}
