//! Property-based tests for graph invariants under arbitrary edit sequences

mod common;

use pixelflow::graph::{Graph, NodeType, ParamValue};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    Connect(usize, usize),
    Disconnect(usize),
    Fill(usize, f32),
    Evaluate,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..NodeType::all().len()).prop_map(Op::Add),
        1 => any::<usize>().prop_map(Op::Remove),
        3 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Connect(a, b)),
        1 => any::<usize>().prop_map(Op::Disconnect),
        1 => (any::<usize>(), 0.0f32..1.0).prop_map(|(n, v)| Op::Fill(n, v)),
        1 => Just(Op::Evaluate),
    ]
}

/// Apply `op`, picking targets by index modulo what exists. Errors are fine.
fn apply(graph: &mut Graph, op: &Op) {
    match *op {
        Op::Add(kind) => {
            graph.add_node(NodeType::all()[kind]);
        }
        Op::Remove(n) => {
            if !graph.nodes().is_empty() {
                let id = graph.nodes()[n % graph.nodes().len()].id;
                let _ = graph.remove_node(id);
            }
        }
        Op::Connect(a, b) => {
            let outputs: Vec<_> = graph
                .nodes()
                .iter()
                .flat_map(|n| n.outputs.iter().map(|p| p.id))
                .collect();
            let inputs: Vec<_> = graph
                .nodes()
                .iter()
                .flat_map(|n| n.inputs.iter().map(|p| p.id))
                .collect();
            if !outputs.is_empty() && !inputs.is_empty() {
                let _ = graph.connect(outputs[a % outputs.len()], inputs[b % inputs.len()]);
            }
        }
        Op::Disconnect(i) => {
            let len = graph.connections().len().max(1);
            let _ = graph.disconnect(i % len);
        }
        Op::Fill(n, v) => {
            if !graph.nodes().is_empty() {
                let id = graph.nodes()[n % graph.nodes().len()].id;
                let _ = graph.set_param(id, "fill", &ParamValue::Float(v as f64));
            }
        }
        Op::Evaluate => {
            graph.evaluate();
        }
    }
}

proptest! {
    #[test]
    fn ids_are_unique_and_never_reused(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut graph = Graph::new();
        let mut ever_seen: HashSet<u32> = HashSet::new();

        for op in &ops {
            let before = graph.next_id();
            apply(&mut graph, op);

            for node in graph.nodes() {
                let ids = std::iter::once(node.id.0)
                    .chain(node.inputs.iter().map(|p| p.id.0))
                    .chain(node.outputs.iter().map(|p| p.id.0));
                for id in ids {
                    prop_assert!(id < graph.next_id());
                    // Anything at or above the old counter is fresh.
                    if id >= before {
                        prop_assert!(ever_seen.insert(id), "ID {} reused", id);
                    }
                }
            }

            let mut live = HashSet::new();
            for node in graph.nodes() {
                prop_assert!(live.insert(node.id.0));
                for pin in node.inputs.iter().chain(&node.outputs) {
                    prop_assert!(live.insert(pin.id.0));
                }
            }
        }
    }

    #[test]
    fn connections_are_valid_after_evaluation(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut graph = Graph::new();
        for op in &ops {
            apply(&mut graph, op);
        }

        let order = graph.evaluate().order.clone();

        // Every node is processed exactly once per pass.
        let visited: HashSet<u32> = order.iter().map(|id| id.0).collect();
        let all: HashSet<u32> = graph.nodes().iter().map(|n| n.id.0).collect();
        prop_assert_eq!(visited.len(), order.len(), "duplicate in order {:?}", order);
        prop_assert_eq!(visited, all);

        for conn in graph.connections() {
            prop_assert!(conn.is_valid(graph.nodes()), "invalid connection {}", conn);
        }
        for node in graph.nodes() {
            for pin in &node.inputs {
                let expected = graph.connections().iter().any(|c| c.input_pin == pin.id);
                prop_assert_eq!(pin.connected, expected);
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut graph = Graph::new();
        for op in &ops {
            apply(&mut graph, op);
        }

        graph.evaluate();
        let first = graph.nodes().to_vec();
        let first_links = graph.connections().to_vec();
        graph.evaluate();

        prop_assert_eq!(first_links, graph.connections().to_vec());
        for (before, after) in first.iter().zip(graph.nodes()) {
            for (a, b) in before.outputs.iter().zip(&after.outputs) {
                prop_assert_eq!(&a.data, &b.data);
            }
        }
    }
}

#[test]
fn test_ids_seeded_in_insertion_order() {
    let mut graph = Graph::new();
    let mut expected = 0;
    for &kind in NodeType::all() {
        let id = graph.add_node(kind);
        assert_eq!(id.0, expected);
        let node = graph.find_node(id).unwrap();
        expected += 1 + (node.inputs.len() + node.outputs.len()) as u32;
    }
    assert_eq!(graph.next_id(), expected);
}

#[test]
fn test_every_kind_is_constructible_by_name() {
    let mut graph = Graph::new();
    for kind in NodeType::all() {
        let id = graph.add_node_by_name(kind.display_name()).unwrap();
        assert_eq!(graph.find_node(id).unwrap().node_type(), *kind);
    }
    assert!(graph.add_node_by_name("Sharpen").is_err());
    assert_eq!(graph.nodes().len(), NodeType::all().len());
}
