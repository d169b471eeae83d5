//! BlendNode: `out = A * (1 - alpha) + B * alpha`. Both inputs must have the same shape.

use crate::graph::buffer::ImageBuffer;
use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::{expect_float, ParamValue};
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("A"),
    PinDescriptor::input("B"),
    PinDescriptor::output("Image"),
];

#[derive(Debug, Clone)]
pub struct BlendNode {
    alpha: f32,
}

impl BlendNode {
    pub fn new() -> Self {
        Self { alpha: 0.5 }
    }

    pub fn name(&self) -> &str {
        "Blend"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let a = ctx.require(0)?;
        let b = ctx.require(1)?;
        let out = blend(a, b, self.alpha)?;
        ctx.set_output(0, out);
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![("alpha", ParamValue::Float(self.alpha as f64))]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "alpha" => {
                let alpha = expect_float(key, value)?;
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(NodeError::InvalidParam {
                        key: key.to_string(),
                        reason: "alpha must be within [0, 1]".to_string(),
                    });
                }
                self.alpha = alpha;
            }
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

impl Default for BlendNode {
    fn default() -> Self {
        Self::new()
    }
}

fn blend(a: &ImageBuffer, b: &ImageBuffer, alpha: f32) -> NodeResult<ImageBuffer> {
    if !a.same_shape(b) {
        if a.channels() != b.channels() && a.width() == b.width() && a.height() == b.height() {
            return Err(NodeError::ChannelMismatch {
                expected: a.channels(),
                actual: b.channels(),
            });
        }
        return Err(NodeError::SizeMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }

    let mut out = a.clone();
    for (o, &v) in out.as_mut_slice().iter_mut().zip(b.as_slice()) {
        *o = *o * (1.0 - alpha) + v * alpha;
    }
    Ok(out)
}
