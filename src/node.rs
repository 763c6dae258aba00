//! Node abstraction: the capability interface plus its storage core.
//!
//! Two-layer design:
//! - **`Node` trait**: what a concrete node implements. It exposes its
//!   [`NodeCore`], a type tag for the registry, and the single `process`
//!   operation.
//! - **`NodeCore`**: the storage every node embeds. Identity, display
//!   name, ordered data slots, execution pins, and free-form string
//!   parameters. Slots and pins are declared once during construction
//!   and the shape never changes afterwards; `process` mutates contents
//!   only.
//!
//! Undeclared slot or pin names are a node-author mistake, not a runtime
//! condition: the loud accessors panic with a message naming the node and
//! slot so the error surfaces in development. Everything the UI or graph
//! layer touches goes through the quiet `find_*`/`has_*` variants.

use crate::error::ProcessError;
use crate::id::NodeId;
use crate::pin::PinDescriptor;
use crate::slot::Slot;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A unit of computation over named typed slots and execution pins.
pub trait Node: Send {
    /// The node's storage core.
    fn core(&self) -> &NodeCore;

    /// Mutable access to the storage core.
    fn core_mut(&mut self) -> &mut NodeCore;

    /// Type tag for factory round-tripping and persistence.
    fn type_name(&self) -> &str;

    /// The sole computational operation.
    ///
    /// Read inputs through the value-or-default accessors, write results
    /// to output slots. An absent input is a normal transient state:
    /// degrade to empty outputs and return `Ok`. Return `Err` only for
    /// genuine processing failures; the evaluator then clears this
    /// node's outputs and continues with the rest of the graph. Must be
    /// idempotent for unchanged inputs and must not touch slots of other
    /// nodes.
    fn process(&mut self) -> Result<(), ProcessError>;
}

/// One named slot entry, kept in declaration order.
#[derive(Debug, Clone)]
struct NamedSlot {
    name: String,
    slot: Slot,
}

/// A free-form configuration pair. Case-sensitive, last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

/// Identity, slots, pins, and parameters shared by every node.
#[derive(Debug, Clone, Default)]
pub struct NodeCore {
    id: NodeId,
    name: String,
    inputs: Vec<NamedSlot>,
    outputs: Vec<NamedSlot>,
    exec_inputs: Vec<String>,
    exec_outputs: Vec<String>,
    params: Vec<Param>,
}

impl NodeCore {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Stamp the identity. Called by the graph when the node is added.
    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    /// Display name shown in the editor.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    // --- Declaration (construction time only) ---

    /// Declare an input slot of the given kind. Idempotent by name: a
    /// repeated declaration returns the existing slot unchanged.
    pub fn declare_input(&mut self, name: impl Into<String>, kind: ValueKind) -> &mut Slot {
        Self::declare_in(&mut self.inputs, name.into(), Slot::new(kind))
    }

    /// Declare an input slot whose kind and fallback come from a default
    /// value used while the slot is unconnected.
    pub fn declare_input_with_default(
        &mut self,
        name: impl Into<String>,
        default: Value,
    ) -> &mut Slot {
        Self::declare_in(&mut self.inputs, name.into(), Slot::with_default(default))
    }

    /// Declare an output slot of the given kind. Idempotent by name.
    pub fn declare_output(&mut self, name: impl Into<String>, kind: ValueKind) -> &mut Slot {
        Self::declare_in(&mut self.outputs, name.into(), Slot::new(kind))
    }

    fn declare_in(slots: &mut Vec<NamedSlot>, name: String, slot: Slot) -> &mut Slot {
        if let Some(pos) = slots.iter().position(|s| s.name == name) {
            return &mut slots[pos].slot;
        }
        slots.push(NamedSlot { name, slot });
        &mut slots.last_mut().expect("just pushed").slot
    }

    /// Declare an execution input pin. Idempotent by name.
    pub fn declare_exec_input(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.exec_inputs.contains(&name) {
            self.exec_inputs.push(name);
        }
    }

    /// Declare an execution output pin. Idempotent by name.
    pub fn declare_exec_output(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.exec_outputs.contains(&name) {
            self.exec_outputs.push(name);
        }
    }

    // --- Loud accessors (node-author contract) ---

    /// The input slot with this name. Panics if it was never declared.
    pub fn input_slot(&self, name: &str) -> &Slot {
        match self.find_input_slot(name) {
            Some(slot) => slot,
            None => panic!("node '{}' has no input slot '{}'", self.name, name),
        }
    }

    /// Mutable input slot. Panics if it was never declared.
    pub fn input_slot_mut(&mut self, name: &str) -> &mut Slot {
        let node = self.name.clone();
        match self.inputs.iter_mut().find(|s| s.name == name) {
            Some(entry) => &mut entry.slot,
            None => panic!("node '{}' has no input slot '{}'", node, name),
        }
    }

    /// The output slot with this name. Panics if it was never declared.
    pub fn output_slot(&self, name: &str) -> &Slot {
        match self.find_output_slot(name) {
            Some(slot) => slot,
            None => panic!("node '{}' has no output slot '{}'", self.name, name),
        }
    }

    /// Mutable output slot. Panics if it was never declared.
    pub fn output_slot_mut(&mut self, name: &str) -> &mut Slot {
        let node = self.name.clone();
        match self.outputs.iter_mut().find(|s| s.name == name) {
            Some(entry) => &mut entry.slot,
            None => panic!("node '{}' has no output slot '{}'", node, name),
        }
    }

    // --- Quiet accessors (graph / validation / UI layers) ---

    pub fn find_input_slot(&self, name: &str) -> Option<&Slot> {
        self.inputs.iter().find(|s| s.name == name).map(|s| &s.slot)
    }

    pub fn find_input_slot_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.inputs
            .iter_mut()
            .find(|s| s.name == name)
            .map(|s| &mut s.slot)
    }

    pub fn find_output_slot(&self, name: &str) -> Option<&Slot> {
        self.outputs
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.slot)
    }

    pub fn has_input_slot(&self, name: &str) -> bool {
        self.find_input_slot(name).is_some()
    }

    pub fn has_output_slot(&self, name: &str) -> bool {
        self.find_output_slot(name).is_some()
    }

    pub fn has_exec_input(&self, name: &str) -> bool {
        self.exec_inputs.iter().any(|p| p == name)
    }

    pub fn has_exec_output(&self, name: &str) -> bool {
        self.exec_outputs.iter().any(|p| p == name)
    }

    pub fn exec_inputs(&self) -> &[String] {
        &self.exec_inputs
    }

    pub fn exec_outputs(&self) -> &[String] {
        &self.exec_outputs
    }

    /// Input slot names in declaration order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|s| s.name.as_str())
    }

    /// Output slot names in declaration order.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|s| s.name.as_str())
    }

    // --- Slot I/O for `process` bodies ---

    /// Live input data when present, else the configured default, else
    /// `None`. Panics if the slot was never declared.
    pub fn input_value(&self, name: &str) -> Option<&Value> {
        self.input_slot(name).value_or_default()
    }

    /// Store data in an input slot. Panics if undeclared.
    pub fn set_input(&mut self, name: &str, value: Value) {
        self.input_slot_mut(name).set(value);
    }

    /// Reset an input slot to empty. Panics if undeclared.
    pub fn clear_input(&mut self, name: &str) {
        self.input_slot_mut(name).clear();
    }

    /// Install a fallback on an input slot. Panics if undeclared.
    pub fn set_input_default(&mut self, name: &str, default: Value) {
        self.input_slot_mut(name).set_default(default);
    }

    /// Store data in an output slot. Panics if undeclared.
    pub fn set_output(&mut self, name: &str, value: Value) {
        self.output_slot_mut(name).set(value);
    }

    /// Reset an output slot to empty. Panics if undeclared.
    pub fn clear_output(&mut self, name: &str) {
        self.output_slot_mut(name).clear();
    }

    /// Reset every output slot. Used on processing failure so no
    /// partial results are published.
    pub fn clear_all_outputs(&mut self) {
        for entry in &mut self.outputs {
            entry.slot.clear();
        }
    }

    // --- Parameters ---

    /// Upsert a parameter. Case-sensitive, last write wins, the value is
    /// stored verbatim.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(param) = self.params.iter_mut().find(|p| p.name == name) {
            param.value = value;
        } else {
            self.params.push(Param { name, value });
        }
    }

    /// Look up a parameter by exact name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// All parameters in insertion order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parse a parameter as `f64`. Absent or unparseable → `None`.
    pub fn param_f64(&self, name: &str) -> Option<f64> {
        self.param(name)?.parse().ok()
    }

    /// Parse a parameter as `f64`, clamped into `[min, max]`; absent or
    /// unparseable values fall back. Clamping is logged.
    pub fn param_f64_clamped(&self, name: &str, min: f64, max: f64, fallback: f64) -> f64 {
        let Some(raw) = self.param_f64(name) else {
            return fallback;
        };
        if raw < min || raw > max {
            warn!(
                node = %self.name,
                param = name,
                value = raw,
                "parameter outside [{min}, {max}], clamping"
            );
        }
        raw.clamp(min, max)
    }

    /// Parse a parameter as `i64`, clamped into `[min, max]`; absent or
    /// unparseable values fall back. Clamping is logged.
    pub fn param_i64_clamped(&self, name: &str, min: i64, max: i64, fallback: i64) -> i64 {
        let Some(raw) = self.param(name).and_then(|v| v.parse::<i64>().ok()) else {
            return fallback;
        };
        if raw < min || raw > max {
            warn!(
                node = %self.name,
                param = name,
                value = raw,
                "parameter outside [{min}, {max}], clamping"
            );
        }
        raw.clamp(min, max)
    }

    // --- UI projection ---

    /// Every pin on this node, in render order: execution inputs, data
    /// inputs, data outputs, execution outputs.
    pub fn pin_descriptors(&self) -> Vec<PinDescriptor> {
        let mut pins = Vec::with_capacity(
            self.exec_inputs.len() + self.inputs.len() + self.outputs.len()
                + self.exec_outputs.len(),
        );
        for name in &self.exec_inputs {
            pins.push(PinDescriptor::exec_input(name.clone()));
        }
        for entry in &self.inputs {
            pins.push(PinDescriptor::data_input(
                entry.name.clone(),
                entry.slot.kind(),
            ));
        }
        for entry in &self.outputs {
            pins.push(PinDescriptor::data_output(
                entry.name.clone(),
                entry.slot.kind(),
            ));
        }
        for name in &self.exec_outputs {
            pins.push(PinDescriptor::exec_output(name.clone()));
        }
        pins
    }
}
