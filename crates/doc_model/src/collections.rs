//! Append-only element collections
//!
//! Titles, footnotes, endnotes, comments and charts are numbered across
//! the whole document in registration order. Ids are 1-based and never
//! reused, including after the element is detached from its parent, so
//! references written earlier stay valid.

use crate::node::NodeHandle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionRegistry {
    items: Vec<NodeHandle>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node and return its 1-based collection id
    pub fn register(&mut self, handle: NodeHandle) -> u32 {
        self.items.push(handle);
        self.items.len() as u32
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, NodeHandle)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, &h)| (i as u32 + 1, h))
    }
}

/// The per-document set of numbered collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    pub titles: CollectionRegistry,
    pub footnotes: CollectionRegistry,
    pub endnotes: CollectionRegistry,
    pub comments: CollectionRegistry,
    pub charts: CollectionRegistry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_one_based_and_monotonic() {
        let mut registry = CollectionRegistry::new();
        assert_eq!(registry.register(NodeHandle::new(10)), 1);
        assert_eq!(registry.register(NodeHandle::new(20)), 2);
        assert_eq!(registry.register(NodeHandle::new(30)), 3);
        let ids: Vec<u32> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
