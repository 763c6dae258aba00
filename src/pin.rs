//! Pin metadata exposed to the render layer.
//!
//! A node's connectable surface is a list of pins: data pins front a
//! typed slot, execution pins carry only a control-flow signal. The UI
//! enumerates [`PinDescriptor`]s to draw and hit-test pins; the
//! connection layer resolves the same information from node declarations
//! when validating an edge.

use crate::value::ValueKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What travels through a pin: a control-flow signal or a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinKind {
    /// "This control path fired." No payload.
    Execution,
    /// A typed [`Value`](crate::value::Value) backed by a slot.
    Data,
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinKind::Execution => f.write_str("execution"),
            PinKind::Data => f.write_str("data"),
        }
    }
}

/// Whether a pin accepts or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    Input,
    Output,
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinDirection::Input => f.write_str("input"),
            PinDirection::Output => f.write_str("output"),
        }
    }
}

/// Description of one pin on one node, in declaration order.
///
/// `value_kind` is the declared slot type for data pins and `None` for
/// execution pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinDescriptor {
    pub name: String,
    pub direction: PinDirection,
    pub kind: PinKind,
    pub value_kind: Option<ValueKind>,
}

impl PinDescriptor {
    pub fn data_input(name: impl Into<String>, value_kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            direction: PinDirection::Input,
            kind: PinKind::Data,
            value_kind: Some(value_kind),
        }
    }

    pub fn data_output(name: impl Into<String>, value_kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            direction: PinDirection::Output,
            kind: PinKind::Data,
            value_kind: Some(value_kind),
        }
    }

    pub fn exec_input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: PinDirection::Input,
            kind: PinKind::Execution,
            value_kind: None,
        }
    }

    pub fn exec_output(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: PinDirection::Output,
            kind: PinKind::Execution,
            value_kind: None,
        }
    }
}
