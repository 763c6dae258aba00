//! Error types for graph mutation and evaluation.
//!
//! Connection rejections and evaluation faults are ordinary `Err` values
//! so the UI can react to them without any control-flow transfer. Node
//! processing failures use the separate [`ProcessError`], which the
//! evaluator contains to the offending node.

use crate::id::{NodeId, PinId};
use crate::pin::PinKind;
use crate::value::ValueKind;
use thiserror::Error;

/// Failures surfaced by graph mutation, connection admission, ordering,
/// and snapshot reconstruction.
#[derive(Error, Debug)]
pub enum GraphError {
    /// An endpoint references a node that is not in the graph.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// An endpoint names a pin its node never declared.
    #[error("node {node} has no pin named '{name}'")]
    UnknownPin { node: NodeId, name: String },

    /// The source endpoint exists but is not an output pin.
    #[error("pin {0} is not an output")]
    NotAnOutput(PinId),

    /// The destination endpoint exists but is not an input pin.
    #[error("pin {0} is not an input")]
    NotAnInput(PinId),

    /// Both endpoints belong to the same node.
    #[error("cannot connect node {0} to itself")]
    SelfConnection(NodeId),

    /// Execution pins connect only to execution pins, data to data.
    #[error("pin kind mismatch: {from} output cannot feed {to} input")]
    KindMismatch { from: PinKind, to: PinKind },

    /// Data pins require exactly equal declared value kinds.
    #[error("data type mismatch: {from} output cannot feed {to} input")]
    TypeMismatch { from: ValueKind, to: ValueKind },

    /// Admitting the edge would make the destination reach back to the
    /// source, so it is refused outright.
    #[error("connecting node {from} to node {to} would create a cycle")]
    WouldCycle { from: NodeId, to: NodeId },

    /// An evaluation order was requested for a graph that contains a
    /// cycle. Only reachable when edges bypassed admission checks.
    #[error("graph contains a cycle; no evaluation order exists")]
    CycleDetected,

    /// The registry has no constructor for the requested type tag.
    #[error("unknown node type '{0}'")]
    UnknownNodeType(String),

    /// A failure with surrounding context (e.g. which snapshot edge
    /// could not be re-admitted).
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<GraphError>,
    },
}

impl GraphError {
    /// Wrap this error with context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        GraphError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// A failure inside one node's `process` call.
///
/// The evaluator clears the node's outputs, records the failure, and
/// keeps evaluating; siblings and downstream nodes only ever see the
/// resulting empty data.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The node's underlying operation failed.
    #[error("{0}")]
    Failed(String),

    /// A required input was absent and the node chose to report it.
    /// Ordinary unconnected inputs should degrade to empty outputs
    /// instead of using this.
    #[error("required input '{slot}' has no data")]
    MissingInput { slot: String },

    /// An I/O failure from a node that intentionally touches files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
