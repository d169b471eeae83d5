//! ImageInputNode: the source of a graph.
//!
//! Holds a source image supplied by the host (`set_image`). Setting the
//! `fill` parameter replaces the source with a solid RGB image of the
//! configured `width` x `height`.

use crate::graph::buffer::ImageBuffer;
use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::{expect_float, expect_usize, ParamValue};
use crate::graph::pin::PinDescriptor;

/// Largest accepted `width` or `height` for generated images.
pub const MAX_IMAGE_DIMENSION: usize = 8192;

static PINS: &[PinDescriptor] = &[PinDescriptor::output("Image")];

/// Source node. Fails with `NoImage` until an image is provided.
#[derive(Debug, Clone)]
pub struct ImageInputNode {
    image: Option<ImageBuffer>,
    width: usize,
    height: usize,
}

impl ImageInputNode {
    pub fn new() -> Self {
        Self::with_size(64, 64)
    }

    /// Input whose generated images use the given size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            image: None,
            width,
            height,
        }
    }

    pub fn name(&self) -> &str {
        "Image Input"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    /// Replace the source image. `None` unloads it.
    pub fn set_image(&mut self, image: Option<ImageBuffer>) {
        self.image = image;
    }

    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let image = self
            .image
            .as_ref()
            .filter(|img| !img.is_empty())
            .ok_or(NodeError::NoImage)?;
        ctx.set_output(0, image.clone());
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("width", ParamValue::Int(self.width as i64)),
            ("height", ParamValue::Int(self.height as i64)),
        ]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "width" => self.width = expect_dimension(key, expect_usize(key, value)?)?,
            "height" => self.height = expect_dimension(key, expect_usize(key, value)?)?,
            "fill" => {
                let fill = expect_float(key, value)?;
                // Size may come from config defaults rather than `set_param`.
                let width = expect_dimension("width", self.width)?;
                let height = expect_dimension("height", self.height)?;
                self.image = Some(ImageBuffer::try_filled(width, height, 3, fill)?);
            }
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

fn expect_dimension(key: &str, value: usize) -> NodeResult<usize> {
    if value > MAX_IMAGE_DIMENSION {
        return Err(NodeError::InvalidParam {
            key: key.to_string(),
            reason: format!("must be at most {}", MAX_IMAGE_DIMENSION),
        });
    }
    Ok(value)
}

impl Default for ImageInputNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::pin::Pin;

    #[test]
    fn test_no_image_is_an_error() {
        let mut node = ImageInputNode::new();
        let mut outputs = vec![Pin::from_descriptor(&PINS[0])];
        let mut ctx = NodeContext {
            inputs: &[],
            outputs: &mut outputs,
        };
        assert_eq!(node.process(&mut ctx), Err(NodeError::NoImage));
    }

    #[test]
    fn test_fill_generates_image() {
        let mut node = ImageInputNode::with_size(4, 2);
        node.set_param("fill", &ParamValue::Float(0.75)).unwrap();

        let mut outputs = vec![Pin::from_descriptor(&PINS[0])];
        let mut ctx = NodeContext {
            inputs: &[],
            outputs: &mut outputs,
        };
        node.process(&mut ctx).unwrap();

        let out = outputs[0].data.as_ref().unwrap();
        assert_eq!((out.width(), out.height(), out.channels()), (4, 2, 3));
        assert!(out.as_slice().iter().all(|&v| v == 0.75));
    }

    #[test]
    fn test_output_is_a_copy() {
        let mut node = ImageInputNode::new();
        node.set_image(Some(ImageBuffer::filled(1, 1, 1, 0.1)));
        let mut outputs = vec![Pin::from_descriptor(&PINS[0])];
        let mut ctx = NodeContext {
            inputs: &[],
            outputs: &mut outputs,
        };
        node.process(&mut ctx).unwrap();

        outputs[0].data.as_mut().unwrap().set(0, 0, 0, 5.0);
        assert_eq!(node.image().unwrap().get(0, 0, 0), Some(0.1));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let mut node = ImageInputNode::with_size(4, 4);
        assert!(node.set_param("width", &ParamValue::Int(i64::MAX)).is_err());
        assert!(node
            .set_param("height", &ParamValue::Int(MAX_IMAGE_DIMENSION as i64 + 1))
            .is_err());
        assert_eq!(node.params()[0], ("width", ParamValue::Int(4)));

        // Defaults bypass `set_param`; fill still refuses them.
        let mut huge = ImageInputNode::with_size(usize::MAX, 2);
        assert!(matches!(
            huge.set_param("fill", &ParamValue::Float(0.5)),
            Err(NodeError::InvalidParam { .. })
        ));
        assert!(huge.image().is_none());
    }
}
