//! Typed storage cells attached to nodes.
//!
//! A slot holds the current [`Value`] plus an optional fallback used when
//! nothing is connected. "Connected" is not tracked separately: a slot is
//! connected precisely when it carries live non-empty data, whether that
//! data arrived over an edge or by direct assignment.

use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};

/// A named storage cell on a node.
///
/// The declared [`ValueKind`] is fixed when the owning node declares the
/// slot and is what connection validation compares; the stored value can
/// be inspected independently and a wrong-alternative read simply yields
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    kind: ValueKind,
    value: Value,
    default: Option<Value>,
}

impl Slot {
    /// A slot with the given declared kind, holding no data.
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            value: Value::Empty,
            default: None,
        }
    }

    /// A slot whose declared kind is taken from its default value.
    pub fn with_default(default: Value) -> Self {
        Self {
            kind: default.kind(),
            value: Value::Empty,
            default: Some(default),
        }
    }

    /// The declared data type of this slot.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Store a value. No kind check happens here; typed enforcement is
    /// the connection layer's job, and wrong-alternative reads are `None`.
    pub fn set(&mut self, value: Value) {
        self.value = value;
    }

    /// The currently stored value (`Empty` when there is no data).
    #[inline]
    pub fn get(&self) -> &Value {
        &self.value
    }

    /// Move the stored value out, leaving the slot empty.
    pub fn take(&mut self) -> Value {
        std::mem::take(&mut self.value)
    }

    /// Reset the stored value to `Empty`. The default is unaffected.
    pub fn clear(&mut self) {
        self.value = Value::Empty;
    }

    /// Install or replace the fallback value.
    pub fn set_default(&mut self, default: Value) {
        self.default = Some(default);
    }

    /// The configured fallback, if any.
    #[inline]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Live data when present, else the default, else nothing.
    /// Defaults never override live data.
    pub fn value_or_default(&self) -> Option<&Value> {
        if !self.value.is_empty() {
            Some(&self.value)
        } else {
            self.default.as_ref()
        }
    }

    /// Whether the slot holds live non-empty data.
    #[inline]
    pub fn has_data(&self) -> bool {
        !self.value.is_empty()
    }

    /// Alias of [`Slot::has_data`]: a slot is connected exactly when it
    /// carries live data.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.has_data()
    }
}
