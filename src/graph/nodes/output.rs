//! OutputNode: the sink of a graph. Keeps a copy of the last image it received.

use crate::graph::buffer::ImageBuffer;
use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::ParamValue;
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[PinDescriptor::input("Image")];

#[derive(Debug, Clone, Default)]
pub struct OutputNode {
    result: Option<ImageBuffer>,
}

impl OutputNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        "Output"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    /// The image received on the last successful pass.
    pub fn result(&self) -> Option<&ImageBuffer> {
        self.result.as_ref()
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        match ctx.require(0) {
            Ok(image) => {
                self.result = Some(image.clone());
                Ok(())
            }
            Err(e) => {
                self.result = None;
                Err(e)
            }
        }
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        Vec::new()
    }

    pub fn set_param(&mut self, key: &str, _value: &ParamValue) -> NodeResult<()> {
        Err(NodeError::UnknownParam(key.to_string()))
    }
}
