//! BrightnessContrastNode: `out = in * contrast + brightness`, per sample.

use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::{expect_float, ParamValue};
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("Image"),
    PinDescriptor::output("Image"),
];

#[derive(Debug, Clone)]
pub struct BrightnessContrastNode {
    brightness: f32,
    contrast: f32,
}

impl BrightnessContrastNode {
    pub fn new() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
        }
    }

    pub fn name(&self) -> &str {
        "Brightness/Contrast"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let (brightness, contrast) = (self.brightness, self.contrast);
        let out = ctx.require(0)?.map(|v| v * contrast + brightness);
        ctx.set_output(0, out);
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("brightness", ParamValue::Float(self.brightness as f64)),
            ("contrast", ParamValue::Float(self.contrast as f64)),
        ]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "brightness" => self.brightness = expect_float(key, value)?,
            "contrast" => self.contrast = expect_float(key, value)?,
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

impl Default for BrightnessContrastNode {
    fn default() -> Self {
        Self::new()
    }
}
