//! ConvolutionNode: convolves every channel with a square, odd-sized kernel.
//!
//! The kernel is applied as a correlation (not flipped), edges clamped.

use crate::graph::buffer::ImageBuffer;
use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::ParamValue;
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("Image"),
    PinDescriptor::output("Image"),
];

#[derive(Debug, Clone)]
pub struct ConvolutionNode {
    size: usize,
    kernel: Vec<f32>,
}

impl ConvolutionNode {
    /// 3x3 identity kernel.
    pub fn new() -> Self {
        let mut kernel = vec![0.0; 9];
        kernel[4] = 1.0;
        Self { size: 3, kernel }
    }

    pub fn name(&self) -> &str {
        "Convolution"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn kernel(&self) -> &[f32] {
        &self.kernel
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let out = convolve(ctx.require(0)?, &self.kernel, self.size);
        ctx.set_output(0, out);
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![(
            "kernel",
            ParamValue::FloatList(self.kernel.iter().map(|&v| v as f64).collect()),
        )]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "kernel" => {
                let values = value.as_float_list().ok_or_else(|| NodeError::InvalidParam {
                    key: key.to_string(),
                    reason: format!("expected a list of numbers, got {:?}", value),
                })?;
                let size = (values.len() as f64).sqrt() as usize;
                if size * size != values.len() || size % 2 == 0 {
                    return Err(NodeError::InvalidParam {
                        key: key.to_string(),
                        reason: format!(
                            "kernel must be square with odd side, got {} values",
                            values.len()
                        ),
                    });
                }
                self.size = size;
                self.kernel = values.iter().map(|&v| v as f32).collect();
            }
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

impl Default for ConvolutionNode {
    fn default() -> Self {
        Self::new()
    }
}

fn convolve(src: &ImageBuffer, kernel: &[f32], size: usize) -> ImageBuffer {
    let half = (size / 2) as isize;
    let mut out = ImageBuffer::new(src.width(), src.height(), src.channels());
    for y in 0..src.height() {
        for x in 0..src.width() {
            for c in 0..src.channels() {
                let mut acc = 0.0;
                for (i, &k) in kernel.iter().enumerate() {
                    let kx = (i % size) as isize - half;
                    let ky = (i / size) as isize - half;
                    acc += k * src.get_clamped(x as isize + kx, y as isize + ky, c);
                }
                out.set(x, y, c, acc);
            }
        }
    }
    out
}
