//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod nodes;

use visionflow::{connect, Graph, NodeId, PinId};

/// Route crate logs to the test harness, honoring `RUST_LOG`.
/// Safe to call from any number of tests; only the first wins.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Connect two pins, panicking with a readable message on rejection
pub fn wire(graph: &mut Graph, from: NodeId, from_pin: &str, to: NodeId, to_pin: &str) {
    connect(
        graph,
        PinId::new(from, from_pin),
        PinId::new(to, to_pin),
    )
    .unwrap_or_else(|e| panic!("wiring {from_pin} -> {to_pin} failed: {e}"));
}
