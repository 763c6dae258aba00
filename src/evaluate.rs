//! Whole-graph evaluation: dependency ordering plus one `process` pass.
//!
//! Both edge kinds induce the same constraint, source before
//! destination. The order is computed with a Kahn traversal that breaks
//! ties by ascending node id, so a given topology always evaluates in
//! the same sequence regardless of insertion order.
//!
//! A node that fails to process does not abort the pass: its outputs
//! are cleared, the failure is recorded in the report, and downstream
//! nodes see the resulting emptiness through the normal transfer step.

use crate::error::{GraphError, GraphResult, ProcessError};
use crate::graph::Graph;
use crate::id::{NodeId, PinId};
use crate::pin::PinKind;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, warn};

/// Outcome of one evaluation pass.
#[derive(Debug, Default)]
pub struct EvalReport {
    /// The order nodes were visited in.
    pub order: Vec<NodeId>,
    /// How many nodes processed without error.
    pub completed: usize,
    /// Nodes whose `process` returned an error, in visit order.
    pub failures: Vec<(NodeId, ProcessError)>,
}

impl EvalReport {
    /// Whether every node processed successfully.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Topological order over all nodes, ascending node id among ties.
///
/// Edges admitted through [`crate::connect::connect`] cannot form a
/// cycle, so `CycleDetected` only ever surfaces for graphs assembled
/// through the raw connection list. Edges whose endpoints are not in
/// the arena are ignored.
pub fn evaluation_order(graph: &Graph) -> GraphResult<Vec<NodeId>> {
    let mut indegree: HashMap<NodeId, usize> =
        graph.node_ids().into_iter().map(|id| (id, 0)).collect();
    let mut successors: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

    for edge in graph.connections() {
        if !indegree.contains_key(&edge.from.node) {
            continue;
        }
        let Some(count) = indegree.get_mut(&edge.to.node) else {
            continue;
        };
        *count += 1;
        successors.entry(edge.from.node).or_default().push(edge.to.node);
    }

    let mut ready: BinaryHeap<Reverse<NodeId>> = indegree
        .iter()
        .filter(|(_, &count)| count == 0)
        .map(|(&id, _)| Reverse(id))
        .collect();

    let mut order = Vec::with_capacity(indegree.len());
    while let Some(Reverse(id)) = ready.pop() {
        order.push(id);
        let Some(next) = successors.get(&id) else {
            continue;
        };
        for &succ in next {
            let Some(count) = indegree.get_mut(&succ) else {
                continue;
            };
            *count -= 1;
            if *count == 0 {
                ready.push(Reverse(succ));
            }
        }
    }

    if order.len() != graph.node_count() {
        return Err(GraphError::CycleDetected);
    }
    Ok(order)
}

/// Evaluate the whole graph once.
///
/// Per node: pull data across inbound edges, then run `process`. When
/// an upstream output is empty its destination input is cleared rather
/// than left stale, so emptiness flows downstream and slot defaults
/// take over. Processing failures are contained per node.
pub fn evaluate(graph: &mut Graph) -> GraphResult<EvalReport> {
    let order = evaluation_order(graph)?;
    let mut completed = 0usize;
    let mut failures: Vec<(NodeId, ProcessError)> = Vec::new();

    for &id in &order {
        transfer_inputs(graph, id);
        let Some(node) = graph.node_mut(id) else {
            continue;
        };
        match node.process() {
            Ok(()) => completed += 1,
            Err(err) => {
                warn!(node_id = %id, error = %err, "node failed to process, clearing outputs");
                node.core_mut().clear_all_outputs();
                failures.push((id, err));
            }
        }
    }

    debug!(
        nodes = order.len(),
        failed = failures.len(),
        "evaluation pass finished"
    );
    Ok(EvalReport {
        order,
        completed,
        failures,
    })
}

/// Copy upstream output values into this node's inputs across every
/// inbound data edge. Missing endpoints are skipped; an empty upstream
/// output clears the destination.
fn transfer_inputs(graph: &mut Graph, id: NodeId) {
    let inbound: Vec<(PinId, String)> = graph
        .connections_into(id)
        .filter(|c| c.kind == PinKind::Data)
        .map(|c| (c.from.clone(), c.to.name.clone()))
        .collect();

    for (from, dest) in inbound {
        let payload = graph
            .node(from.node)
            .and_then(|n| n.core().find_output_slot(&from.name))
            .and_then(|slot| slot.has_data().then(|| slot.get().clone()));

        let Some(node) = graph.node_mut(id) else {
            return;
        };
        let Some(slot) = node.core_mut().find_input_slot_mut(&dest) else {
            continue;
        };
        match payload {
            Some(value) => slot.set(value),
            None => slot.clear(),
        }
    }
}
