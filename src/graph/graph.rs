//! The graph: owner of nodes and connections, and the unit that evaluates.
//!
//! Node and pin lookups are linear scans. Graphs in an editor stay small,
//! and connections refer to pins by their graph-wide ID.

use crate::config::{EditorConfig, EvaluationConfig, FanInPolicy};
use crate::graph::buffer::ImageBuffer;
use crate::graph::connection::Connection;
use crate::graph::error::{GraphError, GraphResult, NodeError};
use crate::graph::evaluator::{EvalReport, Evaluator};
use crate::graph::id::{IdAllocator, NodeId, PinId};
use crate::graph::node::{BuiltinNode, Node, NodeFactory};
use crate::graph::node_type::NodeType;
use crate::graph::param::ParamValue;
use crate::graph::pin::{pin_index, PinDirection};

/// Dataflow graph of image-processing nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    ids: IdAllocator,
    selected: Option<NodeId>,
    factory: NodeFactory,
    settings: EvaluationConfig,
    last_report: EvalReport,
}

impl Graph {
    /// Empty graph with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph using the evaluation settings and node defaults from `config`.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            factory: NodeFactory::new(config.defaults.clone()),
            settings: config.evaluation.clone(),
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &EvaluationConfig {
        &self.settings
    }

    // ── Read access ──

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Connections in creation order. A connection's index is its link ID.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The value the next allocated ID will take.
    pub fn next_id(&self) -> u32 {
        self.ids.peek()
    }

    /// Report of the most recent evaluation pass.
    pub fn last_report(&self) -> &EvalReport {
        &self.last_report
    }

    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn find_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The node owning pin `pin`, searching only pins of the given direction.
    pub fn find_node_by_pin(&self, pin: PinId, direction: PinDirection) -> Option<&Node> {
        self.nodes.iter().find(|n| {
            let pins = match direction {
                PinDirection::Input => &n.inputs,
                PinDirection::Output => &n.outputs,
            };
            pins.iter().any(|p| p.id == pin)
        })
    }

    /// The image held by the first `Output` node, if it has one.
    pub fn output_image(&self) -> Option<&ImageBuffer> {
        self.nodes.iter().find_map(|n| match n.builtin() {
            BuiltinNode::Output(out) => out.result(),
            _ => None,
        })
    }

    /// One line per connection: `out_node:out_pin -> in_node:in_pin`.
    pub fn describe_connections(&self) -> Vec<String> {
        self.connections
            .iter()
            .enumerate()
            .map(|(i, c)| format!("Link {}: {}", i, c))
            .collect()
    }

    // ── Structural mutation ──

    /// Add a node of `node_type`. The node takes the next ID, then its input
    /// pins and output pins take the following IDs in declaration order.
    ///
    /// IDs stop short of `u32::MAX`. When the remaining range cannot hold the
    /// node and its pins, nothing is added and `NodeId::INVALID` is returned.
    pub fn add_node(&mut self, node_type: NodeType) -> NodeId {
        let mut node = self.factory.create(node_type);
        let count = 1 + node.inputs.len() + node.outputs.len();
        let Some(first) = u32::try_from(count)
            .ok()
            .and_then(|count| self.ids.reserve(count))
        else {
            tracing::error!("Node IDs exhausted, cannot add {:?}", node_type);
            return NodeId::INVALID;
        };

        node.id = NodeId(first);
        for (offset, pin) in node
            .inputs
            .iter_mut()
            .chain(node.outputs.iter_mut())
            .enumerate()
        {
            pin.id = PinId(first + 1 + offset as u32);
        }

        let id = node.id;
        tracing::info!("Added node {:?} of type {:?}", id, node_type);
        self.nodes.push(node);
        id
    }

    /// Add a node from a kind tag. Unknown tags create nothing and consume no IDs.
    pub fn add_node_by_name(&mut self, kind: &str) -> GraphResult<NodeId> {
        let node_type: NodeType = kind.parse()?;
        match self.add_node(node_type) {
            NodeId::INVALID => Err(GraphError::IdsExhausted),
            id => Ok(id),
        }
    }

    /// Remove a node and every connection touching it, then evaluate.
    ///
    /// Input pins that lose their only inbound connection are cleared.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<()> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(GraphError::NodeNotFound(id))?;

        let (dropped, kept): (Vec<Connection>, Vec<Connection>) =
            self.connections.iter().partition(|c| c.touches(id));
        self.connections = kept;
        self.nodes.remove(idx);

        for conn in &dropped {
            if conn.input_node != id && !self.input_has_inbound(conn.input_pin) {
                self.clear_input_pin(conn.input_node, conn.input_pin);
            }
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.refresh_pin_flags();

        tracing::info!(
            "Removed node {:?} ({} connections dropped)",
            id,
            dropped.len()
        );
        self.evaluate_if_enabled();
        Ok(())
    }

    /// Connect output pin `output_pin` to input pin `input_pin`.
    ///
    /// Returns the index of the new connection. Nothing is evaluated here;
    /// callers evaluate when they are done editing.
    pub fn connect(&mut self, output_pin: PinId, input_pin: PinId) -> GraphResult<usize> {
        let output_node = self
            .find_node_by_pin(output_pin, PinDirection::Output)
            .map(|n| n.id)
            .ok_or(GraphError::PinNotFound {
                pin: output_pin,
                direction: PinDirection::Output,
            })?;
        let input_node = self
            .find_node_by_pin(input_pin, PinDirection::Input)
            .map(|n| n.id)
            .ok_or(GraphError::PinNotFound {
                pin: input_pin,
                direction: PinDirection::Input,
            })?;

        if self.settings.fan_in == FanInPolicy::RejectAtConnect
            && self.input_has_inbound(input_pin)
        {
            return Err(GraphError::FanInRejected { pin: input_pin });
        }

        let conn = Connection {
            input_node,
            output_node,
            input_pin,
            output_pin,
        };
        self.connections.push(conn);

        for (node_id, pin_id, direction) in [
            (output_node, output_pin, PinDirection::Output),
            (input_node, input_pin, PinDirection::Input),
        ] {
            if let Some(node) = self.find_node_mut(node_id) {
                node.dirty = true;
                let pins = match direction {
                    PinDirection::Input => &mut node.inputs,
                    PinDirection::Output => &mut node.outputs,
                };
                if let Some(i) = pin_index(pins, pin_id) {
                    pins[i].connected = true;
                }
            }
        }

        tracing::info!(
            "Connection created: {} ({} total connections)",
            conn,
            self.connections.len()
        );
        Ok(self.connections.len() - 1)
    }

    /// Remove the connection at `index`, clear its input pin, then evaluate.
    ///
    /// The output pin stays `connected` while other connections still fan out
    /// from it.
    pub fn disconnect(&mut self, index: usize) -> GraphResult<Connection> {
        if index >= self.connections.len() {
            return Err(GraphError::ConnectionIndexOutOfRange {
                index,
                len: self.connections.len(),
            });
        }

        let conn = self.connections.remove(index);
        self.clear_input_pin(conn.input_node, conn.input_pin);
        for node_id in [conn.input_node, conn.output_node] {
            if let Some(node) = self.find_node_mut(node_id) {
                node.dirty = true;
            }
        }
        self.refresh_pin_flags();

        tracing::info!("Removed connection {} ({})", index, conn);
        self.evaluate_if_enabled();
        Ok(conn)
    }

    /// Reset to the initial empty state, including the ID counter.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.ids.reset();
        self.selected = None;
        self.last_report = EvalReport::default();
        tracing::debug!("Graph cleared");
    }

    // ── Selection & parameters ──

    /// Select `id`. Selecting a node that does not exist fails and keeps the old selection.
    pub fn select(&mut self, id: NodeId) -> GraphResult<()> {
        if self.find_node(id).is_none() {
            return Err(GraphError::NodeNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected(&self) -> Option<&Node> {
        self.selected.and_then(|id| self.find_node(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Edit a node parameter. Does not evaluate.
    pub fn set_param(&mut self, id: NodeId, key: &str, value: &ParamValue) -> GraphResult<()> {
        let node = self.find_node_mut(id).ok_or(GraphError::NodeNotFound(id))?;
        node.set_param(key, value)
            .map_err(|source| GraphError::Node { node_id: id, source })
    }

    /// Edit a parameter of the selected node. Does not evaluate.
    pub fn set_selected_param(&mut self, key: &str, value: &ParamValue) -> GraphResult<()> {
        let id = self.selected.ok_or(GraphError::NodeNotFound(NodeId::INVALID))?;
        self.set_param(id, key, value)
    }

    /// Give an `ImageInput` node its source image. Does not evaluate.
    pub fn set_input_image(&mut self, id: NodeId, image: ImageBuffer) -> GraphResult<()> {
        let node = self.find_node_mut(id).ok_or(GraphError::NodeNotFound(id))?;
        match node.builtin_mut() {
            BuiltinNode::ImageInput(input) => {
                input.set_image(Some(image));
                node.dirty = true;
                Ok(())
            }
            _ => Err(GraphError::Node {
                node_id: id,
                source: NodeError::UnknownParam("image".to_string()),
            }),
        }
    }

    // ── Evaluation ──

    /// Run one full evaluation pass over the graph.
    pub fn evaluate(&mut self) -> &EvalReport {
        let report = Evaluator::new(&mut self.nodes, &mut self.connections).run();
        self.refresh_pin_flags();
        self.last_report = report;
        &self.last_report
    }

    pub(crate) fn evaluate_if_enabled(&mut self) {
        if self.settings.evaluate_on_mutation {
            self.evaluate();
        }
    }

    // ── Internal helpers ──

    fn input_has_inbound(&self, input_pin: PinId) -> bool {
        self.connections.iter().any(|c| c.input_pin == input_pin)
    }

    fn clear_input_pin(&mut self, node_id: NodeId, pin_id: PinId) {
        if let Some(node) = self.find_node_mut(node_id) {
            if let Some(i) = pin_index(&node.inputs, pin_id) {
                node.inputs[i].clear();
                node.inputs[i].connected = false;
            }
        }
    }

    /// Recompute every pin's `connected` flag from the connection list.
    fn refresh_pin_flags(&mut self) {
        let connections = &self.connections;
        for node in self.nodes.iter_mut() {
            for pin in node.inputs.iter_mut() {
                pin.connected = connections.iter().any(|c| c.input_pin == pin.id);
            }
            for pin in node.outputs.iter_mut() {
                pin.connected = connections.iter().any(|c| c.output_pin == pin.id);
            }
        }
    }
}
