//! Read-only views of the graph for the rendering layer.

use crate::graph::graph::Graph;
use crate::graph::id::{NodeId, PinId};
use crate::graph::node_type::NodeType;

/// Snapshot of a single pin.
#[derive(Debug, Clone, PartialEq)]
pub struct PinSnapshot {
    pub id: PinId,
    pub name: String,
    pub connected: bool,
    pub has_data: bool,
}

/// Snapshot of a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub node_type: NodeType,
    pub inputs: Vec<PinSnapshot>,
    pub outputs: Vec<PinSnapshot>,
    pub last_error: Option<String>,
}

/// Snapshot of a single link. `index` is the link ID used by `disconnect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSnapshot {
    pub index: usize,
    pub output_pin: PinId,
    pub input_pin: PinId,
}

/// Complete topology snapshot of the graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologySnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub links: Vec<LinkSnapshot>,
    pub selected: Option<NodeId>,
}

impl Graph {
    /// Capture the current topology.
    pub fn snapshot(&self) -> TopologySnapshot {
        let pins = |pins: &[crate::graph::pin::Pin]| {
            pins.iter()
                .map(|p| PinSnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    connected: p.connected,
                    has_data: p.has_data(),
                })
                .collect::<Vec<_>>()
        };

        let nodes = self
            .nodes()
            .iter()
            .map(|n| NodeSnapshot {
                id: n.id,
                name: n.name.clone(),
                node_type: n.node_type(),
                inputs: pins(&n.inputs),
                outputs: pins(&n.outputs),
                last_error: n.last_error().map(|e| e.to_string()),
            })
            .collect();

        let links = self
            .connections()
            .iter()
            .enumerate()
            .map(|(index, c)| LinkSnapshot {
                index,
                output_pin: c.output_pin,
                input_pin: c.input_pin,
            })
            .collect();

        TopologySnapshot {
            nodes,
            links,
            selected: self.selected().map(|n| n.id),
        }
    }
}
