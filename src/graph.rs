//! Graph container: owned nodes, the connection list, and id assignment.
//!
//! The graph owns every node in an id-keyed arena and records
//! connections as an ordered list of pin-to-pin edges. Mutations here
//! are structural and unvalidated; admission rules live in
//! [`crate::connect`] and callers wanting checked edges go through
//! [`crate::connect::connect`].

use crate::id::{NodeId, PinId};
use crate::node::Node;
use crate::pin::PinKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// A directed edge between two pins. `kind` records whether the edge
/// carries data or execution ordering, fixed at admission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: PinId,
    pub to: PinId,
    pub kind: PinKind,
}

impl Connection {
    pub fn new(from: PinId, to: PinId, kind: PinKind) -> Self {
        Self { from, to, kind }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.kind)
    }
}

/// Arena of owned nodes plus the ordered connection list.
pub struct Graph {
    nodes: HashMap<NodeId, Box<dyn Node>>,
    connections: Vec<Connection>,
    next_id: u32,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            connections: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a node under a fresh id. Returns the assigned id.
    pub fn add_node(&mut self, node: Box<dyn Node>) -> NodeId {
        self.add_node_with_id(NodeId::INVALID, node)
    }

    /// Insert a node under the requested id; the invalid sentinel asks
    /// for automatic assignment. A collision with a live id replaces
    /// that node in place. Explicit ids advance the internal counter so
    /// later automatic ids never collide.
    pub fn add_node_with_id(&mut self, id: NodeId, node: Box<dyn Node>) -> NodeId {
        let id = if id.is_valid() {
            self.next_id = self.next_id.max(id.0 + 1);
            id
        } else {
            let fresh = NodeId(self.next_id);
            self.next_id += 1;
            fresh
        };

        let mut node = node;
        node.core_mut().set_id(id);
        if let Some(old) = self.nodes.insert(id, node) {
            warn!(node_id = %id, replaced = old.core().name(), "replacing existing node");
        } else {
            debug!(node_id = %id, "added node");
        }
        id
    }

    /// Remove a node and every connection touching it. Returns `false`
    /// when the id is not present.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.nodes.remove(&id).is_none() {
            return false;
        }
        self.connections
            .retain(|c| c.from.node != id && c.to.node != id);
        debug!(node_id = %id, "removed node");
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&dyn Node> {
        self.nodes.get(&id).map(|n| n.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Node> {
        match self.nodes.get_mut(&id) {
            Some(node) => Some(node.as_mut()),
            None => None,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every node id, ascending.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Append an edge without validation. Reserved for rebuild paths
    /// that have already run the admission rules.
    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Remove the first connection matching both endpoints. Returns
    /// `false` when no edge matches.
    pub fn remove_connection(&mut self, from: &PinId, to: &PinId) -> bool {
        match self
            .connections
            .iter()
            .position(|c| &c.from == from && &c.to == to)
        {
            Some(pos) => {
                self.connections.remove(pos);
                true
            }
            None => false,
        }
    }

    /// All connections in admission order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections terminating at the given node.
    pub fn connections_into(&self, node: NodeId) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter().filter(move |c| c.to.node == node)
    }

    /// Connections originating at the given node.
    pub fn connections_from(&self, node: NodeId) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter().filter(move |c| c.from.node == node)
    }

    /// Drop every node and connection and restart id assignment at 1.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.next_id = 1;
        debug!("cleared graph");
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_ids())
            .field("connections", &self.connections)
            .finish()
    }
}
