//! Connections: directed edges from an output pin to an input pin.

use crate::graph::id::{NodeId, PinId};
use crate::graph::node::Node;

/// Back-reference pair linking `output_node.output_pin` to `input_node.input_pin`.
/// Owns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Consumer node.
    pub input_node: NodeId,
    /// Producer node.
    pub output_node: NodeId,
    pub input_pin: PinId,
    pub output_pin: PinId,
}

impl Connection {
    /// A connection is valid when both nodes exist and each pin belongs to
    /// the right side of its node.
    pub fn is_valid(&self, nodes: &[Node]) -> bool {
        let input_ok = nodes
            .iter()
            .find(|n| n.id == self.input_node)
            .is_some_and(|n| n.inputs.iter().any(|p| p.id == self.input_pin));
        let output_ok = nodes
            .iter()
            .find(|n| n.id == self.output_node)
            .is_some_and(|n| n.outputs.iter().any(|p| p.id == self.output_pin));
        input_ok && output_ok
    }

    /// Whether either endpoint is `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.input_node == node || self.output_node == node
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{}",
            self.output_node, self.output_pin, self.input_node, self.input_pin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let conn = Connection {
            input_node: NodeId(3),
            output_node: NodeId(0),
            input_pin: PinId(4),
            output_pin: PinId(1),
        };
        assert_eq!(conn.to_string(), "0:1 -> 3:4");
        assert!(conn.touches(NodeId(0)));
        assert!(!conn.touches(NodeId(1)));
    }

    #[test]
    fn test_invalid_without_nodes() {
        let conn = Connection {
            input_node: NodeId(3),
            output_node: NodeId(0),
            input_pin: PinId(4),
            output_pin: PinId(1),
        };
        assert!(!conn.is_valid(&[]));
    }
}
