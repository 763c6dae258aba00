//! Structural snapshots of a graph for persistence and undo.
//!
//! A snapshot captures what is needed to rebuild a graph through a
//! [`NodeRegistry`]: node identities, type names, parameters, input
//! defaults, and the connection list. Live slot data is deliberately
//! not captured, it is transient state that the next evaluation pass
//! recomputes.

use crate::connect;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Connection, Graph};
use crate::id::NodeId;
use crate::node::Param;
use crate::registry::NodeRegistry;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Rebuildable state of a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub type_name: String,
    pub name: String,
    pub params: Vec<Param>,
    /// Input defaults present at capture time, in declaration order.
    pub input_defaults: Vec<(String, Value)>,
}

/// Rebuildable state of a whole graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub connections: Vec<Connection>,
}

impl GraphSnapshot {
    /// Capture the graph's structure. Nodes are recorded in ascending
    /// id order, connections in admission order.
    pub fn capture(graph: &Graph) -> Self {
        let mut nodes = Vec::with_capacity(graph.node_count());
        for id in graph.node_ids() {
            let Some(node) = graph.node(id) else {
                continue;
            };
            let core = node.core();
            let input_defaults = core
                .input_names()
                .filter_map(|name| {
                    core.find_input_slot(name)
                        .and_then(|slot| slot.default_value())
                        .map(|default| (name.to_string(), default.clone()))
                })
                .collect();
            nodes.push(NodeSnapshot {
                id,
                type_name: node.type_name().to_string(),
                name: core.name().to_string(),
                params: core.params().to_vec(),
                input_defaults,
            });
        }
        Self {
            nodes,
            connections: graph.connections().to_vec(),
        }
    }

    /// Rebuild a graph from this snapshot using the registry's
    /// constructors.
    ///
    /// Every connection is re-admitted through the validation rules, so
    /// a restored graph holds the same invariants as a live one. A type
    /// name the registry does not know fails the whole restore; a
    /// recorded default for a slot the rebuilt node no longer declares
    /// is skipped with a warning.
    pub fn restore(&self, registry: &NodeRegistry) -> GraphResult<Graph> {
        let mut graph = Graph::new();
        for snap in &self.nodes {
            let mut node = registry
                .create(&snap.type_name, snap.id, &snap.name)
                .ok_or_else(|| GraphError::UnknownNodeType(snap.type_name.clone()))?;

            let core = node.core_mut();
            for (slot_name, default) in &snap.input_defaults {
                match core.find_input_slot_mut(slot_name) {
                    Some(slot) => slot.set_default(default.clone()),
                    None => warn!(
                        node = %snap.name,
                        slot = %slot_name,
                        "snapshot default for a slot the node no longer declares, skipping"
                    ),
                }
            }
            for param in &snap.params {
                core.set_param(&param.name, &param.value);
            }
            graph.add_node_with_id(snap.id, node);
        }

        for conn in &self.connections {
            connect::connect(&mut graph, conn.from.clone(), conn.to.clone()).map_err(|e| {
                e.with_context(format!(
                    "restoring connection {} -> {}",
                    conn.from, conn.to
                ))
            })?;
        }
        Ok(graph)
    }
}
