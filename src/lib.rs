//! # VisionFlow: Typed Dataflow Graph Core
//!
//! The graph model behind a visual vision-pipeline editor. Nodes
//! exchange images, scalars, and point sets through named typed slots;
//! validated pin-to-pin connections wire them together; one evaluation
//! pass runs every node in dependency order.
//!
//! ## Architecture
//!
//! - **Values**: the closed [`Value`] union of payloads slots can hold
//! - **Nodes**: the [`Node`] trait over [`NodeCore`] storage for slots,
//!   execution pins, and string parameters
//! - **Graph**: an id-keyed arena of owned nodes plus the ordered
//!   connection list
//! - **Admission**: validated wiring in [`connect`] keeping every input
//!   single-writer and the whole graph acyclic
//! - **Evaluation**: deterministic dependency ordering with per-node
//!   failure containment in [`evaluate`]
//! - **Persistence**: structural [`GraphSnapshot`]s rebuilt through a
//!   [`NodeRegistry`]
//!
//! ## Example
//!
//! ```ignore
//! use visionflow::{connect, evaluate, Graph, NodeId, NodeRegistry, PinId};
//!
//! // Node types are registered once at startup.
//! let mut registry = NodeRegistry::new();
//! registry.register("LoadImage", |id, name| LoadImageNode::boxed(id, name));
//! registry.register("Threshold", |id, name| ThresholdNode::boxed(id, name));
//!
//! let mut graph = Graph::new();
//! let load = graph.add_node(registry.create("LoadImage", NodeId::INVALID, "load").unwrap());
//! let thresh = graph.add_node(registry.create("Threshold", NodeId::INVALID, "thresh").unwrap());
//!
//! graph.node_mut(load).unwrap().core_mut().set_param("path", "frame.png");
//! connect(&mut graph, PinId::new(load, "Image"), PinId::new(thresh, "Image"))?;
//!
//! let report = evaluate(&mut graph)?;
//! assert!(report.is_clean());
//! ```

pub mod connect;
pub mod error;
pub mod evaluate;
pub mod graph;
pub mod id;
pub mod node;
pub mod pin;
pub mod registry;
pub mod slot;
pub mod snapshot;
pub mod value;

// Re-export commonly used types
pub use connect::{can_connect, connect, disconnect, would_create_cycle};
pub use error::{GraphError, GraphResult, ProcessError};
pub use evaluate::{evaluate, evaluation_order, EvalReport};
pub use graph::{Connection, Graph};
pub use id::{NodeId, PinId};
pub use node::{Node, NodeCore, Param};
pub use pin::{PinDescriptor, PinDirection, PinKind};
pub use registry::{NodeConstructor, NodeRegistry};
pub use slot::Slot;
pub use snapshot::{GraphSnapshot, NodeSnapshot};
pub use value::{ImageBuffer, Point, Value, ValueKind};
