//! Factory registry mapping type names to node constructors.
//!
//! The registry is an explicit object owned by the embedding
//! application, not process-global state. Hosts register every node
//! type at startup and hand the registry to whatever needs to build
//! nodes from names, such as the editor palette or snapshot restore.

use crate::id::NodeId;
use crate::node::Node;
use std::fmt;
use tracing::debug;

/// Builds a concrete node from the identity and display name chosen by
/// the caller.
pub type NodeConstructor = Box<dyn Fn(NodeId, &str) -> Box<dyn Node> + Send + Sync>;

struct RegistryEntry {
    type_name: String,
    build: NodeConstructor,
}

/// Name-keyed collection of node constructors.
#[derive(Default)]
pub struct NodeRegistry {
    entries: Vec<RegistryEntry>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a type name. Registering a name a
    /// second time replaces the earlier constructor.
    pub fn register<F>(&mut self, type_name: impl Into<String>, build: F)
    where
        F: Fn(NodeId, &str) -> Box<dyn Node> + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        let build: NodeConstructor = Box::new(build);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.type_name == type_name) {
            debug!(type_name = %type_name, "replacing registered node constructor");
            entry.build = build;
        } else {
            self.entries.push(RegistryEntry { type_name, build });
        }
    }

    /// Build a node of the named type, or `None` when the type is not
    /// registered.
    pub fn create(&self, type_name: &str, id: NodeId, name: &str) -> Option<Box<dyn Node>> {
        self.entries
            .iter()
            .find(|e| e.type_name == type_name)
            .map(|e| (e.build)(id, name))
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.entries.iter().any(|e| e.type_name == type_name)
    }

    /// All registered type names, sorted ascending for stable palette
    /// listings.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.type_name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
