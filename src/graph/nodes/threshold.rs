//! ThresholdNode: `out = in > threshold ? max_value : 0`, per sample.

use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::{expect_float, ParamValue};
use crate::graph::pin::PinDescriptor;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("Image"),
    PinDescriptor::output("Image"),
];

#[derive(Debug, Clone)]
pub struct ThresholdNode {
    threshold: f32,
    max_value: f32,
}

impl ThresholdNode {
    pub fn new() -> Self {
        Self {
            threshold: 0.5,
            max_value: 1.0,
        }
    }

    pub fn name(&self) -> &str {
        "Threshold"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let (threshold, max_value) = (self.threshold, self.max_value);
        let out = ctx
            .require(0)?
            .map(|v| if v > threshold { max_value } else { 0.0 });
        ctx.set_output(0, out);
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("threshold", ParamValue::Float(self.threshold as f64)),
            ("max_value", ParamValue::Float(self.max_value as f64)),
        ]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "threshold" => self.threshold = expect_float(key, value)?,
            "max_value" => self.max_value = expect_float(key, value)?,
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

impl Default for ThresholdNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::buffer::ImageBuffer;
    use crate::graph::pin::Pin;

    #[test]
    fn test_binarize() {
        let mut node = ThresholdNode::new();
        let mut inputs = vec![Pin::from_descriptor(&PINS[0])];
        inputs[0].data = Some(ImageBuffer::from_data(3, 1, 1, vec![0.2, 0.5, 0.9]).unwrap());
        let mut outputs = vec![Pin::from_descriptor(&PINS[1])];
        let mut ctx = NodeContext {
            inputs: &inputs,
            outputs: &mut outputs,
        };
        node.process(&mut ctx).unwrap();
        assert_eq!(outputs[0].data.as_ref().unwrap().as_slice(), &[0.0, 0.0, 1.0]);
    }
}
