//! Dependency-ordered evaluation of a graph.
//!
//! One pass:
//! 1. Prune connections whose endpoints no longer exist.
//! 2. Visit every node in insertion order. Before a node runs, each of its
//!    upstream producers is visited (depth first, memoized), and the
//!    producer's output buffer is deep-copied into the consumer's input pin.
//! 3. Run the node's `process`. Failures are recorded and the pass goes on.
//!
//! Upstream dependencies are satisfied in connection-list order, so with
//! several connections into one input pin the last one wins.
//!
//! A node reached again while it is still on the current path closes a
//! cycle. The connection that reached it is rejected: its input pin is
//! released before the consumer runs, the connection is skipped for the rest
//! of the pass and removed from the graph afterwards.

use crate::graph::connection::Connection;
use crate::graph::error::{GraphError, NodeError};
use crate::graph::id::NodeId;
use crate::graph::node::Node;
use crate::graph::pin::pin_index;
use std::collections::{BTreeSet, HashSet};

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalReport {
    /// Nodes in the order they were processed.
    pub order: Vec<NodeId>,
    /// Connections removed before traversal because an endpoint was missing.
    pub pruned: Vec<Connection>,
    /// Connections removed because following them closed a cycle.
    pub rejected: Vec<Connection>,
    /// Nodes whose `process` failed, with the error.
    pub failures: Vec<(NodeId, NodeError)>,
}

impl EvalReport {
    /// No pruning, no cycles, no failures.
    pub fn is_clean(&self) -> bool {
        self.pruned.is_empty() && self.rejected.is_empty() && self.failures.is_empty()
    }

    /// Problems of the pass as graph errors, cycles first.
    pub fn errors(&self) -> Vec<GraphError> {
        let cycles = self
            .rejected
            .iter()
            .map(|c| GraphError::CycleDetected { node: c.output_node });
        let failures = self.failures.iter().map(|(id, e)| GraphError::Node {
            node_id: *id,
            source: e.clone(),
        });
        cycles.chain(failures).collect()
    }
}

/// Single-pass evaluator over a graph's nodes and connections.
pub struct Evaluator<'a> {
    nodes: &'a mut [Node],
    connections: &'a mut Vec<Connection>,
    processed: HashSet<NodeId>,
    in_progress: HashSet<NodeId>,
    rejected: BTreeSet<usize>,
    report: EvalReport,
}

impl<'a> Evaluator<'a> {
    pub fn new(nodes: &'a mut [Node], connections: &'a mut Vec<Connection>) -> Self {
        Self {
            nodes,
            connections,
            processed: HashSet::new(),
            in_progress: HashSet::new(),
            rejected: BTreeSet::new(),
            report: EvalReport::default(),
        }
    }

    /// Run the pass and return its report.
    pub fn run(mut self) -> EvalReport {
        self.prune();

        for idx in 0..self.nodes.len() {
            let id = self.nodes[idx].id;
            self.visit(id);
        }

        self.remove_rejected();

        tracing::debug!(
            "Graph evaluated: {} processed, {} pruned, {} rejected, {} failed",
            self.report.order.len(),
            self.report.pruned.len(),
            self.report.rejected.len(),
            self.report.failures.len(),
        );
        self.report
    }

    /// Drop every connection that fails the validity rule.
    fn prune(&mut self) {
        let nodes: &[Node] = &*self.nodes;
        let (valid, invalid): (Vec<Connection>, Vec<Connection>) =
            self.connections.iter().partition(|c| c.is_valid(nodes));

        for conn in &invalid {
            tracing::warn!("Pruning invalid connection {}", conn);
        }
        *self.connections = valid;
        self.report.pruned = invalid;
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    fn visit(&mut self, id: NodeId) {
        if self.processed.contains(&id) {
            return;
        }
        let Some(idx) = self.index_of(id) else {
            return;
        };

        self.in_progress.insert(id);

        for ci in 0..self.connections.len() {
            let conn = self.connections[ci];
            if conn.input_node != id || self.rejected.contains(&ci) {
                continue;
            }
            if self.in_progress.contains(&conn.output_node) {
                tracing::warn!("Cycle detected, rejecting connection {}", conn);
                self.rejected.insert(ci);
                self.release_input(&conn, idx);
                continue;
            }

            self.visit(conn.output_node);
            self.hand_off(&conn, idx);
        }

        let node = &mut self.nodes[idx];
        match node.process() {
            Ok(()) => tracing::trace!("Processed {:?} ({})", id, node.name),
            Err(e) => {
                tracing::warn!("Node {:?} ({}) failed: {}", id, node.name, e);
                self.report.failures.push((id, e));
            }
        }

        self.in_progress.remove(&id);
        self.processed.insert(id);
        self.report.order.push(id);
    }

    /// Deep-copy the producer's output into the consumer's input. An empty
    /// producer buffer leaves the input untouched.
    fn hand_off(&mut self, conn: &Connection, consumer: usize) {
        let Some(producer) = self.index_of(conn.output_node) else {
            return;
        };
        let data = {
            let outputs = &self.nodes[producer].outputs;
            match pin_index(outputs, conn.output_pin) {
                Some(i) => outputs[i].data.as_ref().filter(|d| !d.is_empty()).cloned(),
                None => None,
            }
        };

        let inputs = &mut self.nodes[consumer].inputs;
        if let (Some(data), Some(i)) = (data, pin_index(inputs, conn.input_pin)) {
            inputs[i].data = Some(data);
        }
    }

    /// Clear the consumer's input pin unless another live connection feeds it.
    fn release_input(&mut self, conn: &Connection, consumer: usize) {
        let still_fed = self
            .connections
            .iter()
            .enumerate()
            .any(|(i, c)| c.input_pin == conn.input_pin && !self.rejected.contains(&i));
        if still_fed {
            return;
        }
        let inputs = &mut self.nodes[consumer].inputs;
        if let Some(i) = pin_index(inputs, conn.input_pin) {
            inputs[i].clear();
        }
    }

    /// Remove connections rejected during traversal.
    fn remove_rejected(&mut self) {
        let mut removed: Vec<Connection> = self
            .rejected
            .iter()
            .rev()
            .map(|&ci| self.connections.remove(ci))
            .collect();
        removed.reverse();
        self.report.rejected = removed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::buffer::ImageBuffer;
    use crate::graph::id::PinId;
    use crate::graph::node::NodeFactory;
    use crate::graph::node_type::NodeType;

    fn node(id: u32, node_type: NodeType, first_pin: u32) -> Node {
        let mut node = NodeFactory::default().create(node_type);
        node.id = NodeId(id);
        let mut next = first_pin;
        for pin in node.inputs.iter_mut().chain(node.outputs.iter_mut()) {
            pin.id = PinId(next);
            next += 1;
        }
        node
    }

    fn link(from: &Node, to: &Node) -> Connection {
        Connection {
            input_node: to.id,
            output_node: from.id,
            input_pin: to.inputs[0].id,
            output_pin: from.outputs[0].id,
        }
    }

    #[test]
    fn test_consumer_before_producer_in_node_list() {
        // Output inserted before its producer; recursion must still order them.
        let mut out = node(0, NodeType::Output, 1);
        let mut src = node(10, NodeType::ImageInput, 11);
        if let crate::graph::node::BuiltinNode::ImageInput(n) = src.builtin_mut() {
            n.set_image(Some(ImageBuffer::filled(2, 2, 1, 0.5)));
        }
        let mut connections = vec![link(&src, &out)];
        out.dirty = true;
        let mut nodes = vec![out, src];

        let report = Evaluator::new(&mut nodes, &mut connections).run();

        assert_eq!(report.order, vec![NodeId(10), NodeId(0)]);
        assert!(report.is_clean());
        assert!(nodes[0].inputs[0].has_data());
        assert!(!nodes[0].dirty);
    }

    #[test]
    fn test_prune_missing_endpoint() {
        let blur = node(0, NodeType::Blur, 1);
        let ghost = node(50, NodeType::ImageInput, 51);
        let mut connections = vec![link(&ghost, &blur)];
        let mut nodes = vec![blur];

        let report = Evaluator::new(&mut nodes, &mut connections).run();

        assert!(connections.is_empty());
        assert_eq!(report.pruned.len(), 1);
    }

    #[test]
    fn test_prune_pin_on_wrong_node() {
        let a = node(0, NodeType::Blur, 1);
        let b = node(3, NodeType::Blur, 4);
        let mut bad = link(&a, &b);
        bad.input_pin = a.inputs[0].id;
        let mut connections = vec![bad];
        let mut nodes = vec![a, b];

        let report = Evaluator::new(&mut nodes, &mut connections).run();

        assert!(connections.is_empty());
        assert_eq!(report.pruned, vec![bad]);
    }

    #[test]
    fn test_two_node_cycle_is_rejected() {
        let a = node(0, NodeType::Blur, 1);
        let b = node(3, NodeType::Threshold, 4);
        let ab = link(&a, &b);
        let ba = link(&b, &a);
        let mut connections = vec![ab, ba];
        let mut nodes = vec![a, b];

        let report = Evaluator::new(&mut nodes, &mut connections).run();

        assert_eq!(report.rejected, vec![ab]);
        assert_eq!(connections, vec![ba]);
        assert_eq!(report.order.len(), 2);
        assert!(matches!(
            report.errors()[0],
            GraphError::CycleDetected { node: NodeId(0) }
        ));
    }

    #[test]
    fn test_self_loop_is_rejected() {
        let a = node(0, NodeType::Blur, 1);
        let mut connections = vec![link(&a, &a)];
        let mut nodes = vec![a];

        let report = Evaluator::new(&mut nodes, &mut connections).run();

        assert_eq!(report.rejected.len(), 1);
        assert!(connections.is_empty());
        assert_eq!(report.order, vec![NodeId(0)]);
    }

    #[test]
    fn test_failure_does_not_stop_pass() {
        let broken = node(0, NodeType::Blur, 1);
        let mut src = node(3, NodeType::ImageInput, 4);
        if let crate::graph::node::BuiltinNode::ImageInput(n) = src.builtin_mut() {
            n.set_image(Some(ImageBuffer::filled(1, 1, 1, 1.0)));
        }
        let mut connections = Vec::new();
        let mut nodes = vec![broken, src];

        let report = Evaluator::new(&mut nodes, &mut connections).run();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, NodeId(0));
        assert!(nodes[1].outputs[0].has_data());
    }
}
