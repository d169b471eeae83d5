//! Events reported by the rendering/interaction layer.
//!
//! `Graph::apply_event` translates each gesture into a graph operation and
//! evaluates afterwards. Lookup and bounds failures are logged and dropped:
//! while the user is editing, the graph is often briefly invalid and the
//! next pass fixes it up.

use crate::graph::error::GraphResult;
use crate::graph::graph::Graph;
use crate::graph::id::{NodeId, PinId};
use crate::graph::node_type::NodeType;
use crate::graph::param::ParamValue;

/// Discrete UI gestures the graph reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A node was placed from the palette.
    NodeAdded(NodeType),
    /// A link was dragged from an output pin to an input pin.
    LinkCreated { output_pin: PinId, input_pin: PinId },
    /// Delete gesture on a hovered link, addressed by its index.
    LinkDeleted(usize),
    /// Delete gesture on a hovered node.
    NodeDeleted(NodeId),
    /// A node was clicked.
    NodeSelected(NodeId),
    /// A parameter was edited in the node's UI.
    ParamEdited {
        node_id: NodeId,
        key: String,
        value: ParamValue,
    },
}

impl Graph {
    /// Apply one UI event. Returns `true` if the graph changed.
    pub fn apply_event(&mut self, event: EditorEvent) -> bool {
        let result = self.try_apply_event(&event);
        match result {
            Ok(changed) => changed,
            Err(e) => {
                tracing::debug!("Ignoring {:?}: {}", event, e);
                false
            }
        }
    }

    fn try_apply_event(&mut self, event: &EditorEvent) -> GraphResult<bool> {
        match event {
            EditorEvent::NodeAdded(node_type) => {
                self.add_node(*node_type);
                self.evaluate_if_enabled();
            }
            EditorEvent::LinkCreated {
                output_pin,
                input_pin,
            } => {
                self.connect(*output_pin, *input_pin)?;
                self.evaluate_if_enabled();
            }
            // Both evaluate on their own.
            EditorEvent::LinkDeleted(index) => {
                self.disconnect(*index)?;
            }
            EditorEvent::NodeDeleted(node_id) => {
                self.remove_node(*node_id)?;
            }
            EditorEvent::NodeSelected(node_id) => {
                self.select(*node_id)?;
                return Ok(false);
            }
            EditorEvent::ParamEdited {
                node_id,
                key,
                value,
            } => {
                self.set_param(*node_id, key, value)?;
                self.evaluate_if_enabled();
            }
        }
        Ok(true)
    }
}
