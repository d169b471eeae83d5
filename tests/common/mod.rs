//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use pixelflow::graph::{Graph, NodeId, PinId};

/// ID of the `index`-th output pin of `node`.
pub fn out_pin(graph: &Graph, node: NodeId, index: usize) -> PinId {
    graph.find_node(node).expect("node exists").outputs[index].id
}

/// ID of the `index`-th input pin of `node`.
pub fn in_pin(graph: &Graph, node: NodeId, index: usize) -> PinId {
    graph.find_node(node).expect("node exists").inputs[index].id
}

/// Connect the first output of `from` to the first input of `to`.
pub fn link(graph: &mut Graph, from: NodeId, to: NodeId) -> usize {
    let output = out_pin(graph, from, 0);
    let input = in_pin(graph, to, 0);
    graph.connect(output, input).expect("connect")
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Assert every sample of an image is approximately `expected`.
pub fn assert_all_samples(image: &pixelflow::ImageBuffer, expected: f32) {
    assert!(!image.is_empty(), "image is empty");
    for &v in image.as_slice() {
        assert_float_eq(v, expected, 1e-5);
    }
}
