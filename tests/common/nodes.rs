//! Reusable node implementations for integration tests
//!
//! A small vision-flavored node library: an image source, pixel
//! transforms, point extraction, and probes for order and failure
//! behavior. `test_registry` registers everything constructible from a
//! plain type name.

use std::sync::{Arc, Mutex};
use visionflow::{
    ImageBuffer, Node, NodeCore, NodeId, NodeRegistry, Point, ProcessError, Value, ValueKind,
};

/// Builder for test images
pub struct ImageBuilder {
    width: u32,
    height: u32,
    channels: u8,
    fill: u8,
    pixels: Vec<(u32, u32, u8)>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self {
            width: 4,
            height: 4,
            channels: 1,
            fill: 0,
            pixels: Vec::new(),
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    pub fn fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }

    /// Set the first-channel sample at `(x, y)`
    pub fn pixel(mut self, x: u32, y: u32, value: u8) -> Self {
        self.pixels.push((x, y, value));
        self
    }

    pub fn build(self) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.width, self.height, self.channels);
        for sample in image.pixels_mut() {
            *sample = self.fill;
        }
        for (x, y, value) in self.pixels {
            let idx = ((y * self.width + x) * self.channels as u32) as usize;
            image.pixels_mut()[idx] = value;
        }
        image
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits a constant image sized and filled from parameters.
pub struct SourceImage {
    core: NodeCore,
}

impl SourceImage {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_output("Image", ValueKind::Image);
        Box::new(Self { core })
    }
}

impl Node for SourceImage {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "SourceImage"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        let width = self.core.param_i64_clamped("width", 1, 4096, 8) as u32;
        let height = self.core.param_i64_clamped("height", 1, 4096, 8) as u32;
        let channels = self.core.param_i64_clamped("channels", 1, 4, 1) as u8;
        let fill = self.core.param_i64_clamped("fill", 0, 255, 0) as u8;

        let mut image = ImageBuffer::new(width, height, channels);
        for sample in image.pixels_mut() {
            *sample = fill;
        }
        self.core.set_output("Image", Value::Image(image));
        Ok(())
    }
}

/// Adds an amount to every sample; the amount is a data input with a
/// default so unconnected graphs still process.
pub struct Brightness {
    core: NodeCore,
}

impl Brightness {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_input("Image", ValueKind::Image);
        core.declare_input_with_default("Amount", Value::Float(0.0));
        core.declare_output("Image", ValueKind::Image);
        Box::new(Self { core })
    }
}

impl Node for Brightness {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "Brightness"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        let amount = self
            .core
            .input_value("Amount")
            .and_then(Value::as_float)
            .unwrap_or(0.0);
        let Some(mut image) = self.core.input_value("Image").and_then(Value::as_image).cloned()
        else {
            self.core.clear_output("Image");
            return Ok(());
        };
        for sample in image.pixels_mut() {
            *sample = (*sample as f64 + amount).round().clamp(0.0, 255.0) as u8;
        }
        self.core.set_output("Image", Value::Image(image));
        Ok(())
    }
}

/// Binarizes samples against the `threshold` parameter.
pub struct Threshold {
    core: NodeCore,
}

impl Threshold {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_input("Image", ValueKind::Image);
        core.declare_output("Mask", ValueKind::Image);
        Box::new(Self { core })
    }
}

impl Node for Threshold {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "Threshold"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        let threshold = self.core.param_f64_clamped("threshold", 0.0, 255.0, 128.0);
        let Some(mut mask) = self.core.input_value("Image").and_then(Value::as_image).cloned()
        else {
            self.core.clear_output("Mask");
            return Ok(());
        };
        for sample in mask.pixels_mut() {
            *sample = if (*sample as f64) >= threshold { 255 } else { 0 };
        }
        self.core.set_output("Mask", Value::Image(mask));
        Ok(())
    }
}

/// Collects coordinates of first-channel samples at or above `cutoff`.
pub struct BrightPoints {
    core: NodeCore,
}

impl BrightPoints {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_input("Image", ValueKind::Image);
        core.declare_output("Points", ValueKind::Points);
        Box::new(Self { core })
    }
}

impl Node for BrightPoints {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "BrightPoints"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        let cutoff = self.core.param_i64_clamped("cutoff", 0, 255, 200) as u8;
        let found = self
            .core
            .input_value("Image")
            .and_then(Value::as_image)
            .map(|image| {
                let mut points = Vec::new();
                for y in 0..image.height() {
                    for x in 0..image.width() {
                        let idx = ((y * image.width() + x) * image.channels() as u32) as usize;
                        if image.pixels()[idx] >= cutoff {
                            points.push(Point::new(x as i32, y as i32));
                        }
                    }
                }
                points
            });
        match found {
            Some(points) => self.core.set_output("Points", Value::Points(points)),
            None => self.core.clear_output("Points"),
        }
        Ok(())
    }
}

/// Counts an incoming point set.
pub struct CountPoints {
    core: NodeCore,
}

impl CountPoints {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_input("Points", ValueKind::Points);
        core.declare_output("Count", ValueKind::Int);
        Box::new(Self { core })
    }
}

impl Node for CountPoints {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "CountPoints"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        let count = self
            .core
            .input_value("Points")
            .and_then(Value::as_points)
            .map(|points| points.len() as i64);
        match count {
            Some(n) => self.core.set_output("Count", Value::Int(n)),
            None => self.core.clear_output("Count"),
        }
        Ok(())
    }
}

/// Averages every sample of an image into a float.
pub struct MeanBrightness {
    core: NodeCore,
}

impl MeanBrightness {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_input("Image", ValueKind::Image);
        core.declare_output("Mean", ValueKind::Float);
        Box::new(Self { core })
    }
}

impl Node for MeanBrightness {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "MeanBrightness"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        let mean = self
            .core
            .input_value("Image")
            .and_then(Value::as_image)
            .filter(|image| !image.is_empty())
            .map(|image| {
                let sum: u64 = image.pixels().iter().map(|&s| s as u64).sum();
                sum as f64 / image.len() as f64
            });
        match mean {
            Some(value) => self.core.set_output("Mean", Value::Float(value)),
            None => self.core.clear_output("Mean"),
        }
        Ok(())
    }
}

/// Passes an integer through, or fails when `mode` is set to `fail`.
pub struct PassOrFail {
    core: NodeCore,
}

impl PassOrFail {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_input("In", ValueKind::Int);
        core.declare_output("Out", ValueKind::Int);
        Box::new(Self { core })
    }
}

impl Node for PassOrFail {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "PassOrFail"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        if self.core.param("mode") == Some("fail") {
            return Err(ProcessError::Failed("failure requested by test".into()));
        }
        match self.core.input_value("In").cloned() {
            Some(value) => self.core.set_output("Out", value),
            None => self.core.clear_output("Out"),
        }
        Ok(())
    }
}

/// Emits an integer taken from the `value` parameter.
pub struct ConstInt {
    core: NodeCore,
}

impl ConstInt {
    pub fn boxed(id: NodeId, name: &str) -> Box<dyn Node> {
        let mut core = NodeCore::new(id, name);
        core.declare_output("Out", ValueKind::Int);
        Box::new(Self { core })
    }
}

impl Node for ConstInt {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "ConstInt"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        match self.core.param("value").and_then(|v| v.parse().ok()) {
            Some(value) => self.core.set_output("Out", Value::Int(value)),
            None => self.core.clear_output("Out"),
        }
        Ok(())
    }
}

/// Execution-only node appending its name to a shared log when
/// processed. Used to observe evaluation order.
pub struct OrderProbe {
    core: NodeCore,
    log: Arc<Mutex<Vec<String>>>,
}

impl OrderProbe {
    pub fn boxed(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Box<dyn Node> {
        let mut core = NodeCore::new(NodeId::INVALID, name);
        core.declare_exec_input("Run");
        core.declare_exec_output("Then");
        Box::new(Self {
            core,
            log: Arc::clone(log),
        })
    }
}

impl Node for OrderProbe {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn type_name(&self) -> &str {
        "OrderProbe"
    }

    fn process(&mut self) -> Result<(), ProcessError> {
        self.log.lock().unwrap().push(self.core.name().to_string());
        Ok(())
    }
}

/// Registry covering every node type constructible from a type name.
pub fn test_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    registry.register("SourceImage", |id, name| SourceImage::boxed(id, name));
    registry.register("Brightness", |id, name| Brightness::boxed(id, name));
    registry.register("Threshold", |id, name| Threshold::boxed(id, name));
    registry.register("BrightPoints", |id, name| BrightPoints::boxed(id, name));
    registry.register("CountPoints", |id, name| CountPoints::boxed(id, name));
    registry.register("MeanBrightness", |id, name| MeanBrightness::boxed(id, name));
    registry.register("PassOrFail", |id, name| PassOrFail::boxed(id, name));
    registry.register("ConstInt", |id, name| ConstInt::boxed(id, name));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_builder() {
        let image = ImageBuilder::new()
            .width(3)
            .height(2)
            .fill(10)
            .pixel(2, 1, 250)
            .build();

        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.pixels()[0], 10);
        assert_eq!(image.pixels()[5], 250);
    }
}
