//! Test data builders for creating test graphs

use pixelflow::config::EditorConfig;
use pixelflow::graph::{Graph, NodeId, NodeType, ParamValue};
use std::collections::HashMap;

/// Builder for graphs whose nodes are addressed by a short label.
pub struct GraphBuilder {
    graph: Graph,
    labels: HashMap<&'static str, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            graph: Graph::with_config(config),
            labels: HashMap::new(),
        }
    }

    pub fn node(mut self, label: &'static str, node_type: NodeType) -> Self {
        let id = self.graph.add_node(node_type);
        self.labels.insert(label, id);
        self
    }

    /// A 2x2 RGB `ImageInput` filled with `value`.
    pub fn source(self, label: &'static str, value: f32) -> Self {
        self.node(label, NodeType::ImageInput)
            .param(label, "width", ParamValue::Int(2))
            .param(label, "height", ParamValue::Int(2))
            .param(label, "fill", ParamValue::Float(value as f64))
    }

    pub fn param(mut self, label: &'static str, key: &str, value: ParamValue) -> Self {
        let id = self.labels[label];
        self.graph.set_param(id, key, &value).expect("set_param");
        self
    }

    /// Link output `from_pin` of `from` to input `to_pin` of `to`.
    pub fn link_pins(
        mut self,
        from: &'static str,
        from_pin: usize,
        to: &'static str,
        to_pin: usize,
    ) -> Self {
        let output = super::out_pin(&self.graph, self.labels[from], from_pin);
        let input = super::in_pin(&self.graph, self.labels[to], to_pin);
        self.graph.connect(output, input).expect("connect");
        self
    }

    pub fn link(self, from: &'static str, to: &'static str) -> Self {
        self.link_pins(from, 0, to, 0)
    }

    pub fn build(self) -> (Graph, HashMap<&'static str, NodeId>) {
        (self.graph, self.labels)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder() {
        let (graph, ids) = GraphBuilder::new()
            .source("src", 0.5)
            .node("out", NodeType::Output)
            .link("src", "out")
            .build();

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.connections().len(), 1);
        assert_eq!(graph.connections()[0].output_node, ids["src"]);
    }
}
