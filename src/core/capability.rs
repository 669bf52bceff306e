//! Capability identity.
//!
//! A capability is an opaque label describing a skill an agent offers or
//! requires. Matching is exact: `"research"` and `"Research"` are distinct
//! capabilities. There is no hierarchy or wildcard semantics.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque, comparable capability token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// Create a capability from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The capability label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Capability {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// An ordered set of capabilities.
///
/// Iteration order is sorted, so listings derived from a set are
/// deterministic regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    caps: BTreeSet<Capability>,
}

impl CapabilitySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability to the set.
    pub fn add(&mut self, cap: Capability) {
        self.caps.insert(cap);
    }

    /// Remove a capability from the set.
    pub fn remove(&mut self, cap: &Capability) {
        self.caps.remove(cap);
    }

    /// Whether the set contains the capability.
    pub fn contains(&self, cap: &Capability) -> bool {
        self.caps.contains(cap)
    }

    /// Iterate the capabilities in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.caps.iter()
    }

    /// Capabilities present in both sets.
    pub fn intersection(&self, other: &CapabilitySet) -> CapabilitySet {
        CapabilitySet {
            caps: self.caps.intersection(&other.caps).cloned().collect(),
        }
    }

    /// Number of capabilities in the set.
    pub fn len(&self) -> usize {
        self.caps.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            caps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_exact_match() {
        assert_eq!(Capability::from("research"), Capability::new("research"));
        assert_ne!(Capability::from("research"), Capability::from("Research"));
        assert_ne!(Capability::from("research"), Capability::from("research2"));
    }

    #[test]
    fn test_display_round_trip() {
        let cap = Capability::from("writing");
        assert_eq!(cap.to_string(), "writing");
        assert_eq!(cap.as_str(), "writing");
    }

    #[test]
    fn test_serde_transparent() {
        let cap: Capability = serde_json::from_str("\"coding\"").unwrap();
        assert_eq!(cap, Capability::from("coding"));
        assert_eq!(serde_json::to_string(&cap).unwrap(), "\"coding\"");
    }

    #[test]
    fn test_set_add_remove_contains() {
        let mut set = CapabilitySet::new();
        set.add(Capability::from("research"));
        set.add(Capability::from("writing"));

        assert!(set.contains(&Capability::from("research")));
        assert!(!set.contains(&Capability::from("coding")));

        set.remove(&Capability::from("research"));
        assert!(!set.contains(&Capability::from("research")));
        assert!(set.contains(&Capability::from("writing")));
    }

    #[test]
    fn test_set_iteration_is_sorted() {
        let set: CapabilitySet = ["zebra", "alpha", "mango"]
            .into_iter()
            .map(Capability::from)
            .collect();

        let listed: Vec<&str> = set.iter().map(Capability::as_str).collect();
        assert_eq!(listed, vec!["alpha", "mango", "zebra"]);
    }

    #[test]
    fn test_set_intersection() {
        let a: CapabilitySet = ["research", "writing"].into_iter().map(Capability::from).collect();
        let b: CapabilitySet = ["writing", "coding"].into_iter().map(Capability::from).collect();

        let both = a.intersection(&b);
        assert_eq!(both.len(), 1);
        assert!(both.contains(&Capability::from("writing")));
    }
}
