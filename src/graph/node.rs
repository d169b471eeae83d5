//! Node abstraction for the graph.
//!
//! - **`BuiltinNode` enum**: the closed set of processing kinds. Every
//!   operation is an exhaustive match, so adding a kind fails to compile
//!   until each arm handles it.
//! - **`Node`**: what the graph owns: identity, pins, dirty flag and the
//!   last processing error, wrapped around a `BuiltinNode`.
//!
//! `NodeFactory` builds nodes from a `NodeType` tag.

use crate::config::NodeDefaults;
use crate::graph::buffer::ImageBuffer;
use crate::graph::error::{NodeError, NodeResult};
use crate::graph::id::NodeId;
use crate::graph::node_type::NodeType;
use crate::graph::nodes::{
    BlendNode, BlurNode, BrightnessContrastNode, ChannelSplitterNode, ConvolutionNode,
    EdgeDetectionNode, ImageInputNode, NoiseNode, OutputNode, ThresholdNode,
};
use crate::graph::param::ParamValue;
use crate::graph::pin::{Pin, PinDescriptor, PinDirection};

/// View of a node's pins handed to `process`.
pub struct NodeContext<'a> {
    /// Input pins, already populated by the evaluator.
    pub inputs: &'a [Pin],
    /// Output pins. The node writes its results here.
    pub outputs: &'a mut [Pin],
}

impl<'a> NodeContext<'a> {
    /// The non-empty buffer on input `index`, if any.
    pub fn input(&self, index: usize) -> Option<&ImageBuffer> {
        self.inputs
            .get(index)
            .and_then(|p| p.data.as_ref())
            .filter(|d| !d.is_empty())
    }

    /// Like `input`, but a missing buffer is a `MissingInput` error.
    pub fn require(&self, index: usize) -> NodeResult<&ImageBuffer> {
        self.input(index).ok_or_else(|| {
            let name = self
                .inputs
                .get(index)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| format!("#{}", index));
            NodeError::MissingInput(name)
        })
    }

    /// Replace the buffer on output `index`. Out-of-range indices are ignored.
    pub fn set_output(&mut self, index: usize, image: ImageBuffer) {
        if let Some(pin) = self.outputs.get_mut(index) {
            pin.data = Some(image);
        }
    }

    /// Drop every output buffer.
    pub fn clear_outputs(&mut self) {
        for pin in self.outputs.iter_mut() {
            pin.clear();
        }
    }
}

/// Enum dispatch for built-in nodes.
#[derive(Debug, Clone)]
pub enum BuiltinNode {
    ImageInput(ImageInputNode),
    Output(OutputNode),
    BrightnessContrast(BrightnessContrastNode),
    ColorChannelSplitter(ChannelSplitterNode),
    Blur(BlurNode),
    Threshold(ThresholdNode),
    EdgeDetection(EdgeDetectionNode),
    Blend(BlendNode),
    Noise(NoiseNode),
    Convolution(ConvolutionNode),
}

impl BuiltinNode {
    pub fn node_type(&self) -> NodeType {
        match self {
            BuiltinNode::ImageInput(_) => NodeType::ImageInput,
            BuiltinNode::Output(_) => NodeType::Output,
            BuiltinNode::BrightnessContrast(_) => NodeType::BrightnessContrast,
            BuiltinNode::ColorChannelSplitter(_) => NodeType::ColorChannelSplitter,
            BuiltinNode::Blur(_) => NodeType::Blur,
            BuiltinNode::Threshold(_) => NodeType::Threshold,
            BuiltinNode::EdgeDetection(_) => NodeType::EdgeDetection,
            BuiltinNode::Blend(_) => NodeType::Blend,
            BuiltinNode::Noise(_) => NodeType::Noise,
            BuiltinNode::Convolution(_) => NodeType::Convolution,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BuiltinNode::ImageInput(n) => n.name(),
            BuiltinNode::Output(n) => n.name(),
            BuiltinNode::BrightnessContrast(n) => n.name(),
            BuiltinNode::ColorChannelSplitter(n) => n.name(),
            BuiltinNode::Blur(n) => n.name(),
            BuiltinNode::Threshold(n) => n.name(),
            BuiltinNode::EdgeDetection(n) => n.name(),
            BuiltinNode::Blend(n) => n.name(),
            BuiltinNode::Noise(n) => n.name(),
            BuiltinNode::Convolution(n) => n.name(),
        }
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        match self {
            BuiltinNode::ImageInput(n) => n.pins(),
            BuiltinNode::Output(n) => n.pins(),
            BuiltinNode::BrightnessContrast(n) => n.pins(),
            BuiltinNode::ColorChannelSplitter(n) => n.pins(),
            BuiltinNode::Blur(n) => n.pins(),
            BuiltinNode::Threshold(n) => n.pins(),
            BuiltinNode::EdgeDetection(n) => n.pins(),
            BuiltinNode::Blend(n) => n.pins(),
            BuiltinNode::Noise(n) => n.pins(),
            BuiltinNode::Convolution(n) => n.pins(),
        }
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        match self {
            BuiltinNode::ImageInput(n) => n.process(ctx),
            BuiltinNode::Output(n) => n.process(ctx),
            BuiltinNode::BrightnessContrast(n) => n.process(ctx),
            BuiltinNode::ColorChannelSplitter(n) => n.process(ctx),
            BuiltinNode::Blur(n) => n.process(ctx),
            BuiltinNode::Threshold(n) => n.process(ctx),
            BuiltinNode::EdgeDetection(n) => n.process(ctx),
            BuiltinNode::Blend(n) => n.process(ctx),
            BuiltinNode::Noise(n) => n.process(ctx),
            BuiltinNode::Convolution(n) => n.process(ctx),
        }
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        match self {
            BuiltinNode::ImageInput(n) => n.params(),
            BuiltinNode::Output(n) => n.params(),
            BuiltinNode::BrightnessContrast(n) => n.params(),
            BuiltinNode::ColorChannelSplitter(n) => n.params(),
            BuiltinNode::Blur(n) => n.params(),
            BuiltinNode::Threshold(n) => n.params(),
            BuiltinNode::EdgeDetection(n) => n.params(),
            BuiltinNode::Blend(n) => n.params(),
            BuiltinNode::Noise(n) => n.params(),
            BuiltinNode::Convolution(n) => n.params(),
        }
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match self {
            BuiltinNode::ImageInput(n) => n.set_param(key, value),
            BuiltinNode::Output(n) => n.set_param(key, value),
            BuiltinNode::BrightnessContrast(n) => n.set_param(key, value),
            BuiltinNode::ColorChannelSplitter(n) => n.set_param(key, value),
            BuiltinNode::Blur(n) => n.set_param(key, value),
            BuiltinNode::Threshold(n) => n.set_param(key, value),
            BuiltinNode::EdgeDetection(n) => n.set_param(key, value),
            BuiltinNode::Blend(n) => n.set_param(key, value),
            BuiltinNode::Noise(n) => n.set_param(key, value),
            BuiltinNode::Convolution(n) => n.set_param(key, value),
        }
    }
}

/// A node owned by the graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub inputs: Vec<Pin>,
    pub outputs: Vec<Pin>,
    /// Set on topology or parameter change; cleared once the node has processed.
    pub dirty: bool,
    kind: BuiltinNode,
    last_error: Option<NodeError>,
}

impl Node {
    /// Wrap a built-in node, creating its pins from the declared descriptors.
    /// IDs are left unassigned; the graph assigns them on insertion.
    pub fn new(kind: BuiltinNode) -> Self {
        let descriptors = kind.pins();
        let inputs = descriptors
            .iter()
            .filter(|d| d.direction == PinDirection::Input)
            .map(Pin::from_descriptor)
            .collect();
        let outputs = descriptors
            .iter()
            .filter(|d| d.direction == PinDirection::Output)
            .map(Pin::from_descriptor)
            .collect();

        Self {
            id: NodeId::INVALID,
            name: kind.name().to_string(),
            inputs,
            outputs,
            dirty: true,
            kind,
            last_error: None,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn builtin(&self) -> &BuiltinNode {
        &self.kind
    }

    pub fn builtin_mut(&mut self) -> &mut BuiltinNode {
        &mut self.kind
    }

    /// Error from the most recent `process` call, if it failed.
    pub fn last_error(&self) -> Option<&NodeError> {
        self.last_error.as_ref()
    }

    /// Run the node on its current inputs.
    ///
    /// On failure the outputs are cleared, the error is kept as `last_error`
    /// and returned to the caller.
    pub fn process(&mut self) -> NodeResult<()> {
        let mut ctx = NodeContext {
            inputs: &self.inputs,
            outputs: &mut self.outputs,
        };
        let result = self.kind.process(&mut ctx);
        if result.is_err() {
            ctx.clear_outputs();
        }
        self.last_error = result.as_ref().err().cloned();
        self.dirty = false;
        result
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        self.kind.params()
    }

    /// Parameter-editing hook. Does not evaluate anything by itself.
    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        self.kind.set_param(key, value)?;
        self.dirty = true;
        Ok(())
    }
}

/// Factory for creating nodes from a `NodeType`.
///
/// Holds the defaults that some kinds are seeded with.
#[derive(Debug, Clone, Default)]
pub struct NodeFactory {
    defaults: NodeDefaults,
}

impl NodeFactory {
    pub fn new(defaults: NodeDefaults) -> Self {
        Self { defaults }
    }

    /// Create a node based on the NodeType.
    pub fn create(&self, node_type: NodeType) -> Node {
        let kind = match node_type {
            NodeType::ImageInput => BuiltinNode::ImageInput(ImageInputNode::with_size(
                self.defaults.image_width,
                self.defaults.image_height,
            )),
            NodeType::Output => BuiltinNode::Output(OutputNode::new()),
            NodeType::BrightnessContrast => {
                BuiltinNode::BrightnessContrast(BrightnessContrastNode::new())
            }
            NodeType::ColorChannelSplitter => {
                BuiltinNode::ColorChannelSplitter(ChannelSplitterNode::new())
            }
            NodeType::Blur => BuiltinNode::Blur(BlurNode::new()),
            NodeType::Threshold => BuiltinNode::Threshold(ThresholdNode::new()),
            NodeType::EdgeDetection => BuiltinNode::EdgeDetection(EdgeDetectionNode::new()),
            NodeType::Blend => BuiltinNode::Blend(BlendNode::new()),
            NodeType::Noise => BuiltinNode::Noise(NoiseNode::with_seed(self.defaults.noise_seed)),
            NodeType::Convolution => BuiltinNode::Convolution(ConvolutionNode::new()),
        };
        Node::new(kind)
    }
}
