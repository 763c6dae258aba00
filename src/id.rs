//! Identity types for the graph.
//!
//! `NodeId` is a newtype over `u32` handed out by the graph's counter;
//! `0` is reserved as the unassigned/invalid sentinel so a zeroed id can
//! never collide with a live node. Pins are addressed by owning node plus
//! pin name; names are unique per node per direction and kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a node within a [`Graph`](crate::graph::Graph).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The reserved "unassigned" sentinel. Passing it to
    /// [`Graph::add_node_with_id`](crate::graph::Graph::add_node_with_id)
    /// requests auto-assignment.
    pub const INVALID: NodeId = NodeId(0);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "NodeId(INVALID)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Address of one pin: the owning node plus the pin's declared name.
///
/// Connections store two of these. Whether a `PinId` refers to a data slot
/// or an execution pin (and in which direction) is resolved against the
/// owning node's declarations when an edge is validated.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinId {
    pub node: NodeId,
    pub name: String,
}

impl PinId {
    pub fn new(node: NodeId, name: impl Into<String>) -> Self {
        Self {
            node,
            name: name.into(),
        }
    }
}

impl fmt::Debug for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PinId({}, {:?})", self.node, self.name)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' on {}", self.name, self.node)
    }
}
