//! In-memory registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::core::{Agent, Capability, MeshError};

use super::Registry;

struct Entry {
    /// Position in registration order; re-registration keeps the slot.
    seq: u64,
    agent: Arc<dyn Agent>,
}

/// Single-process, in-memory agent registry.
///
/// Reads (lookups, capability scans, listings) take a shared lock and
/// proceed concurrently; registration and deregistration take the
/// exclusive lock for the duration of one map mutation. The lock is never
/// held across an agent run.
///
/// `list` and `find_by_capability` return agents in registration order,
/// which keeps results stable for a fixed registration history.
#[derive(Default)]
pub struct LocalRegistry {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    agents: HashMap<String, Entry>,
    next_seq: u64,
}

impl LocalRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn ordered(&self, mut filter: impl FnMut(&Arc<dyn Agent>) -> bool) -> Vec<Arc<dyn Agent>> {
        let inner = self.inner.read();
        let mut entries: Vec<(u64, Arc<dyn Agent>)> = inner
            .agents
            .values()
            .filter(|e| filter(&e.agent))
            .map(|e| (e.seq, Arc::clone(&e.agent)))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, agent)| agent).collect()
    }
}

impl Registry for LocalRegistry {
    fn register(&self, agent: Arc<dyn Agent>) -> Result<(), MeshError> {
        let id = agent.id().to_string();
        if id.is_empty() {
            return Err(MeshError::Registration {
                reason: "agent id must not be empty".to_string(),
            });
        }

        let mut inner = self.inner.write();
        match inner.agents.get_mut(&id) {
            Some(entry) => {
                // Re-registration is an update: replace the agent, keep
                // its position in registration order.
                entry.agent = agent;
                debug!(agent_id = %id, "agent re-registered");
            }
            None => {
                let seq = inner.next_seq;
                inner.next_seq += 1;
                inner.agents.insert(id.clone(), Entry { seq, agent });
                debug!(agent_id = %id, "agent registered");
            }
        }
        Ok(())
    }

    fn deregister(&self, agent_id: &str) -> bool {
        let removed = self.inner.write().agents.remove(agent_id).is_some();
        if removed {
            debug!(agent_id = %agent_id, "agent deregistered");
        }
        removed
    }

    fn get(&self, agent_id: &str) -> Result<Arc<dyn Agent>, MeshError> {
        self.inner
            .read()
            .agents
            .get(agent_id)
            .map(|e| Arc::clone(&e.agent))
            .ok_or_else(|| MeshError::AgentNotFound {
                id: agent_id.to_string(),
            })
    }

    fn find_by_capability(&self, cap: &Capability) -> Vec<Arc<dyn Agent>> {
        self.ordered(|agent| agent.provides().contains(cap))
    }

    fn list(&self) -> Vec<Arc<dyn Agent>> {
        self.ordered(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubAgent;

    fn provider(id: &str, caps: &[&str]) -> Arc<dyn Agent> {
        Arc::new(StubAgent::new(id).provides(caps))
    }

    #[test]
    fn test_register_and_get() {
        let reg = LocalRegistry::new();
        reg.register(provider("researcher", &["research"])).unwrap();

        let found = reg.get("researcher").unwrap();
        assert_eq!(found.id(), "researcher");
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let reg = LocalRegistry::new();
        let err = reg.get("ghost").unwrap_err();
        assert!(matches!(err, MeshError::AgentNotFound { .. }));
    }

    #[test]
    fn test_register_empty_id_fails() {
        let reg = LocalRegistry::new();
        let err = reg.register(provider("", &[])).unwrap_err();
        assert!(matches!(err, MeshError::Registration { .. }));
    }

    #[test]
    fn test_reregister_replaces_agent() {
        let reg = LocalRegistry::new();
        reg.register(provider("worker", &["research"])).unwrap();
        reg.register(provider("worker", &["writing"])).unwrap();

        let found = reg.get("worker").unwrap();
        assert_eq!(found.provides(), &[Capability::from("writing")]);
        assert_eq!(reg.list().len(), 1);
    }

    #[test]
    fn test_deregister_removes() {
        let reg = LocalRegistry::new();
        reg.register(provider("worker", &[])).unwrap();

        assert!(reg.deregister("worker"));
        assert!(!reg.deregister("worker"));
        assert!(reg.get("worker").is_err());
    }

    #[test]
    fn test_find_by_capability_is_exact_match() {
        let reg = LocalRegistry::new();
        reg.register(provider("a", &["research"])).unwrap();
        reg.register(provider("b", &["Research"])).unwrap();
        reg.register(provider("c", &["research2"])).unwrap();

        let found = reg.find_by_capability(&Capability::from("research"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "a");
    }

    #[test]
    fn test_list_is_registration_ordered_and_stable() {
        let reg = LocalRegistry::new();
        reg.register(provider("c", &[])).unwrap();
        reg.register(provider("a", &[])).unwrap();
        reg.register(provider("b", &[])).unwrap();

        let ids = |agents: Vec<Arc<dyn Agent>>| -> Vec<String> {
            agents.iter().map(|a| a.id().to_string()).collect()
        };

        assert_eq!(ids(reg.list()), vec!["c", "a", "b"]);
        assert_eq!(ids(reg.list()), vec!["c", "a", "b"]);

        // Re-registration keeps the original slot.
        reg.register(provider("a", &["writing"])).unwrap();
        assert_eq!(ids(reg.list()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        let reg = Arc::new(LocalRegistry::new());
        reg.register(provider("seed", &["research"])).unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let reg = Arc::clone(&reg);
            handles.push(std::thread::spawn(move || {
                for j in 0..50 {
                    if i % 2 == 0 {
                        let id = format!("agent-{i}-{j}");
                        reg.register(Arc::new(StubAgent::new(&id).provides(&["research"])))
                            .unwrap();
                    } else {
                        // Reads proceed while writers mutate.
                        let _ = reg.find_by_capability(&Capability::from("research"));
                        let _ = reg.get("seed").unwrap();
                    }
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        assert!(reg.get("seed").is_ok());
        assert_eq!(reg.list().len(), 1 + 4 * 50);
    }
}
