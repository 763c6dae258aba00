//! The closed value union that travels between nodes.
//!
//! Every payload a slot can hold is one alternative of [`Value`]. The set
//! is closed and exhaustively matchable: consumers handle "wrong
//! alternative" as an ordinary `None`, never as a downcast or an error
//! path. `Empty` is alternative 0 and doubles as "no data": clearing a
//! slot resets it to `Empty` rather than to any null reference, so
//! has-data checks are a discriminant comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// An integer image coordinate, used by point-sequence payloads
/// (contours, polylines, sample positions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Owned raster buffer holding the image payload exchanged between
/// processing nodes. Interleaved row-major `u8` samples, `channels` per
/// pixel.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a zero-filled buffer of the given dimensions.
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            pixels: vec![0; len],
        }
    }

    /// Wrap existing pixel data. Returns `None` when the sample count
    /// does not match `width * height * channels`.
    pub fn from_pixels(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Total number of samples (`width * height * channels`).
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the buffer holds zero pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

impl fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}

/// Discriminant tags for [`Value`]. Slots declare one of these as their
/// data type; connection validation compares declared tags, never the
/// run-time contents of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Empty,
    Image,
    Float,
    Int,
    Bool,
    Text,
    Path,
    Points,
}

impl ValueKind {
    /// Stable lowercase label for log and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Empty => "empty",
            ValueKind::Image => "image",
            ValueKind::Float => "float",
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::Text => "text",
            ValueKind::Path => "path",
            ValueKind::Points => "points",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The data that can occupy a slot and travel across a connection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// No data. Freshly declared slots and cleared slots hold this.
    #[default]
    Empty,
    Image(ImageBuffer),
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
    Path(PathBuf),
    Points(Vec<Point>),
}

impl Value {
    /// The discriminant tag of the stored alternative.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Image(_) => ValueKind::Image,
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Path(_) => ValueKind::Path,
            Value::Points(_) => ValueKind::Points,
        }
    }

    /// Whether this is the `Empty` alternative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageBuffer> {
        match self {
            Value::Image(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&[Point]> {
        match self {
            Value::Points(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<PathBuf> for Value {
    fn from(v: PathBuf) -> Self {
        Value::Path(v)
    }
}

impl From<ImageBuffer> for Value {
    fn from(v: ImageBuffer) -> Self {
        Value::Image(v)
    }
}

impl From<Vec<Point>> for Value {
    fn from(v: Vec<Point>) -> Self {
        Value::Points(v)
    }
}
