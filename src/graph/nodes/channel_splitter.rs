//! ChannelSplitterNode: splits an RGB(A) image into three single-channel images.
//!
//! Single-channel input is replicated to all three outputs. Two-channel
//! input is rejected.

use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::ParamValue;
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("Image"),
    PinDescriptor::output("Red"),
    PinDescriptor::output("Green"),
    PinDescriptor::output("Blue"),
];

#[derive(Debug, Clone, Default)]
pub struct ChannelSplitterNode;

impl ChannelSplitterNode {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &str {
        "Channel Splitter"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let image = ctx.require(0)?;
        let planes = match image.channels() {
            1 => {
                let gray = image.clone();
                [gray.clone(), gray.clone(), gray]
            }
            n if n >= 3 => {
                let plane = |c| {
                    image
                        .channel(c)
                        .ok_or(NodeError::ChannelMismatch { expected: 3, actual: n })
                };
                [plane(0)?, plane(1)?, plane(2)?]
            }
            n => return Err(NodeError::ChannelMismatch { expected: 3, actual: n }),
        };

        for (i, plane) in planes.into_iter().enumerate() {
            ctx.set_output(i, plane);
        }
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        Vec::new()
    }

    pub fn set_param(&mut self, key: &str, _value: &ParamValue) -> NodeResult<()> {
        Err(NodeError::UnknownParam(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::buffer::ImageBuffer;
    use crate::graph::pin::Pin;

    fn run(image: ImageBuffer) -> (NodeResult<()>, Vec<Pin>) {
        let mut node = ChannelSplitterNode::new();
        let mut inputs = vec![Pin::from_descriptor(&PINS[0])];
        inputs[0].data = Some(image);
        let mut outputs: Vec<Pin> = PINS[1..].iter().map(Pin::from_descriptor).collect();
        let mut ctx = NodeContext {
            inputs: &inputs,
            outputs: &mut outputs,
        };
        let result = node.process(&mut ctx);
        (result, outputs)
    }

    #[test]
    fn test_split_rgb() {
        let img = ImageBuffer::from_data(1, 1, 3, vec![0.1, 0.2, 0.3]).unwrap();
        let (result, outputs) = run(img);
        assert!(result.is_ok());
        let values: Vec<f32> = outputs
            .iter()
            .map(|p| p.data.as_ref().unwrap().as_slice()[0])
            .collect();
        assert_eq!(values, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_gray_is_replicated() {
        let (result, outputs) = run(ImageBuffer::filled(2, 2, 1, 0.4));
        assert!(result.is_ok());
        assert!(outputs.iter().all(|p| p.data.as_ref().unwrap().channels() == 1));
    }

    #[test]
    fn test_two_channels_rejected() {
        let (result, _) = run(ImageBuffer::filled(1, 1, 2, 0.0));
        assert_eq!(
            result,
            Err(NodeError::ChannelMismatch {
                expected: 3,
                actual: 2
            })
        );
    }
}
