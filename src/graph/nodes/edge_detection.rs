//! EdgeDetectionNode: Sobel gradient magnitude of the luminance, times `scale`.
//!
//! Output is single-channel regardless of the input channel count.

use crate::graph::buffer::ImageBuffer;
use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::{expect_float, ParamValue};
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("Image"),
    PinDescriptor::output("Edges"),
];

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

#[derive(Debug, Clone)]
pub struct EdgeDetectionNode {
    scale: f32,
}

impl EdgeDetectionNode {
    pub fn new() -> Self {
        Self { scale: 1.0 }
    }

    pub fn name(&self) -> &str {
        "Edge Detection"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let out = sobel(&ctx.require(0)?.luminance(), self.scale);
        ctx.set_output(0, out);
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![("scale", ParamValue::Float(self.scale as f64))]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "scale" => self.scale = expect_float(key, value)?,
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

impl Default for EdgeDetectionNode {
    fn default() -> Self {
        Self::new()
    }
}

fn sobel(gray: &ImageBuffer, scale: f32) -> ImageBuffer {
    let mut out = ImageBuffer::new(gray.width(), gray.height(), 1);
    for y in 0..gray.height() {
        for x in 0..gray.width() {
            let (mut gx, mut gy) = (0.0, 0.0);
            for (ky, (row_x, row_y)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
                for kx in 0..3 {
                    let v = gray.get_clamped(x as isize + kx as isize - 1, y as isize + ky as isize - 1, 0);
                    gx += row_x[kx] * v;
                    gy += row_y[kx] * v;
                }
            }
            out.set(x, y, 0, (gx * gx + gy * gy).sqrt() * scale);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_has_no_edges() {
        let out = sobel(&ImageBuffer::filled(4, 4, 1, 0.7), 1.0);
        assert!(out.as_slice().iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn test_vertical_step_detected() {
        let mut img = ImageBuffer::new(4, 3, 1);
        for y in 0..3 {
            img.set(2, y, 0, 1.0);
            img.set(3, y, 0, 1.0);
        }
        let out = sobel(&img, 1.0);
        assert!(out.get(1, 1, 0).unwrap() > 1.0);
        assert!(out.get(0, 1, 0).unwrap().abs() < 1e-6);
    }
}
