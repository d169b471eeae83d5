//! BlurNode: box blur over a `(2 * radius + 1)` square window, edges clamped.

use crate::graph::buffer::ImageBuffer;
use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::{expect_usize, ParamValue};
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("Image"),
    PinDescriptor::output("Image"),
];

/// Largest radius the parameter UI may set.
pub const MAX_BLUR_RADIUS: usize = 32;

#[derive(Debug, Clone)]
pub struct BlurNode {
    radius: usize,
}

impl BlurNode {
    pub fn new() -> Self {
        Self { radius: 1 }
    }

    pub fn name(&self) -> &str {
        "Blur"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let out = box_blur(ctx.require(0)?, self.radius);
        ctx.set_output(0, out);
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![("radius", ParamValue::Int(self.radius as i64))]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "radius" => {
                let radius = expect_usize(key, value)?;
                if radius > MAX_BLUR_RADIUS {
                    return Err(NodeError::InvalidParam {
                        key: key.to_string(),
                        reason: format!("radius must be at most {}", MAX_BLUR_RADIUS),
                    });
                }
                self.radius = radius;
            }
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

impl Default for BlurNode {
    fn default() -> Self {
        Self::new()
    }
}

fn box_blur(src: &ImageBuffer, radius: usize) -> ImageBuffer {
    if radius == 0 {
        return src.clone();
    }
    let r = radius as isize;
    let norm = ((2 * r + 1) * (2 * r + 1)) as f32;
    let mut out = ImageBuffer::new(src.width(), src.height(), src.channels());
    for y in 0..src.height() {
        for x in 0..src.width() {
            for c in 0..src.channels() {
                let mut sum = 0.0;
                for dy in -r..=r {
                    for dx in -r..=r {
                        sum += src.get_clamped(x as isize + dx, y as isize + dy, c);
                    }
                }
                out.set(x, y, c, sum / norm);
            }
        }
    }
    out
}
