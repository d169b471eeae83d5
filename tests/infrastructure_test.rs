//! Test to verify test infrastructure works correctly

mod common;

use common::builders::GraphBuilder;
use pixelflow::NodeType;

#[test]
fn test_infrastructure_setup() {
    let (graph, ids) = GraphBuilder::new()
        .source("src", 0.25)
        .node("out", NodeType::Output)
        .link("src", "out")
        .build();

    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.connections()[0].input_node, ids["out"]);
}

#[test]
fn test_float_comparison() {
    common::assert_float_eq(1.0, 1.000_000_1, 0.001);
}

#[test]
#[should_panic]
fn test_float_comparison_fails() {
    common::assert_float_eq(1.0, 2.0, 0.001);
}
