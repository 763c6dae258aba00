//! Connection admission: the validated path for wiring pins together.
//!
//! [`Graph::add_connection`] is a raw list append; everything
//! user-driven goes through [`connect`], which runs the admission rules
//! in order and keeps two structural invariants:
//!
//! - **single writer**: at most one edge terminates at any input pin.
//!   Admitting an edge into an occupied input replaces the old edge.
//! - **acyclic**: an edge is rejected outright if any path already
//!   leads from its destination node back to its source node. Both
//!   data and execution edges count, so evaluation order always exists.

use crate::error::{GraphError, GraphResult};
use crate::graph::{Connection, Graph};
use crate::id::{NodeId, PinId};
use crate::node::NodeCore;
use crate::pin::PinKind;
use crate::value::ValueKind;
use std::collections::HashSet;
use tracing::debug;

/// How a pin name resolved on one side of a candidate edge.
struct ResolvedPin {
    kind: PinKind,
    value_kind: Option<ValueKind>,
}

fn resolve_output(core: &NodeCore, pin: &PinId) -> GraphResult<ResolvedPin> {
    if let Some(slot) = core.find_output_slot(&pin.name) {
        return Ok(ResolvedPin {
            kind: PinKind::Data,
            value_kind: Some(slot.kind()),
        });
    }
    if core.has_exec_output(&pin.name) {
        return Ok(ResolvedPin {
            kind: PinKind::Execution,
            value_kind: None,
        });
    }
    if core.has_input_slot(&pin.name) || core.has_exec_input(&pin.name) {
        return Err(GraphError::NotAnOutput(pin.clone()));
    }
    Err(GraphError::UnknownPin {
        node: pin.node,
        name: pin.name.clone(),
    })
}

fn resolve_input(core: &NodeCore, pin: &PinId) -> GraphResult<ResolvedPin> {
    if let Some(slot) = core.find_input_slot(&pin.name) {
        return Ok(ResolvedPin {
            kind: PinKind::Data,
            value_kind: Some(slot.kind()),
        });
    }
    if core.has_exec_input(&pin.name) {
        return Ok(ResolvedPin {
            kind: PinKind::Execution,
            value_kind: None,
        });
    }
    if core.has_output_slot(&pin.name) || core.has_exec_output(&pin.name) {
        return Err(GraphError::NotAnInput(pin.clone()));
    }
    Err(GraphError::UnknownPin {
        node: pin.node,
        name: pin.name.clone(),
    })
}

/// Run the admission rules without mutating the graph. On success
/// returns the kind the edge would carry.
///
/// Rules, in order: both pins must exist with the required direction,
/// the nodes must differ, the pin kinds must match, data pins must
/// declare exactly equal value kinds, and the edge must not close a
/// cycle.
pub fn can_connect(graph: &Graph, from: &PinId, to: &PinId) -> GraphResult<PinKind> {
    let source = graph
        .node(from.node)
        .ok_or(GraphError::UnknownNode(from.node))?;
    let dest = graph.node(to.node).ok_or(GraphError::UnknownNode(to.node))?;

    let out = resolve_output(source.core(), from)?;
    let inp = resolve_input(dest.core(), to)?;

    if from.node == to.node {
        return Err(GraphError::SelfConnection(from.node));
    }
    if out.kind != inp.kind {
        return Err(GraphError::KindMismatch {
            from: out.kind,
            to: inp.kind,
        });
    }
    if let (Some(produced), Some(expected)) = (out.value_kind, inp.value_kind) {
        // Exact tag equality; no widening or coercion between kinds.
        if produced != expected {
            return Err(GraphError::TypeMismatch {
                from: produced,
                to: expected,
            });
        }
    }
    if would_create_cycle(graph, from.node, to.node) {
        return Err(GraphError::WouldCycle {
            from: from.node,
            to: to.node,
        });
    }
    Ok(out.kind)
}

/// Validate and record an edge. An existing edge into the destination
/// pin is removed first so each input keeps a single writer.
pub fn connect(graph: &mut Graph, from: PinId, to: PinId) -> GraphResult<()> {
    let kind = can_connect(graph, &from, &to)?;

    let displaced: Vec<PinId> = graph
        .connections_into(to.node)
        .filter(|c| c.to == to)
        .map(|c| c.from.clone())
        .collect();
    for old_from in displaced {
        graph.remove_connection(&old_from, &to);
        debug!(from = %old_from, to = %to, "displacing edge into occupied input");
    }

    debug!(from = %from, to = %to, kind = %kind, "connected");
    graph.add_connection(Connection::new(from, to, kind));
    Ok(())
}

/// Remove the edge between two pins if present.
pub fn disconnect(graph: &mut Graph, from: &PinId, to: &PinId) -> bool {
    let removed = graph.remove_connection(from, to);
    if removed {
        debug!(from = %from, to = %to, "disconnected");
    }
    removed
}

/// Whether an edge `from -> to` would close a cycle, i.e. whether any
/// existing path leads from `to` back to `from`. Edges of both kinds
/// are followed.
pub fn would_create_cycle(graph: &Graph, from: NodeId, to: NodeId) -> bool {
    if from == to {
        return true;
    }
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![to];
    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        for edge in graph.connections_from(current) {
            if edge.to.node == from {
                return true;
            }
            stack.push(edge.to.node);
        }
    }
    false
}
