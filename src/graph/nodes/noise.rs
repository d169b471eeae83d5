//! NoiseNode: adds uniform noise in `[-amount, amount]` to every sample.
//!
//! The generator is reseeded from `seed` on every call, so the same input
//! always yields the same output across evaluation passes.

use crate::graph::error::{NodeError, NodeResult};
use crate::graph::node::NodeContext;
use crate::graph::param::{expect_float, ParamValue};
use crate::graph::pin::PinDescriptor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound for `amount`. Keeps the sampling range well inside `f32`.
pub const MAX_NOISE_AMOUNT: f32 = 1.0e6;

static PINS: &[PinDescriptor] = &[
    PinDescriptor::input("Image"),
    PinDescriptor::output("Image"),
];

#[derive(Debug, Clone)]
pub struct NoiseNode {
    amount: f32,
    seed: u64,
}

impl NoiseNode {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { amount: 0.1, seed }
    }

    pub fn name(&self) -> &str {
        "Noise"
    }

    pub fn pins(&self) -> &'static [PinDescriptor] {
        PINS
    }

    pub fn process(&mut self, ctx: &mut NodeContext) -> NodeResult<()> {
        let mut out = ctx.require(0)?.clone();
        if self.amount > 0.0 {
            let mut rng = StdRng::seed_from_u64(self.seed);
            for v in out.as_mut_slice() {
                *v += rng.gen_range(-self.amount..=self.amount);
            }
        }
        ctx.set_output(0, out);
        Ok(())
    }

    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("amount", ParamValue::Float(self.amount as f64)),
            ("seed", ParamValue::Int(self.seed as i64)),
        ]
    }

    pub fn set_param(&mut self, key: &str, value: &ParamValue) -> NodeResult<()> {
        match key {
            "amount" => {
                let amount = expect_float(key, value)?;
                if !(0.0..=MAX_NOISE_AMOUNT).contains(&amount) {
                    return Err(NodeError::InvalidParam {
                        key: key.to_string(),
                        reason: format!("amount must be within [0, {}]", MAX_NOISE_AMOUNT),
                    });
                }
                self.amount = amount;
            }
            "seed" => {
                self.seed = value.as_int().ok_or_else(|| NodeError::InvalidParam {
                    key: key.to_string(),
                    reason: format!("expected an integer, got {:?}", value),
                })? as u64;
            }
            _ => return Err(NodeError::UnknownParam(key.to_string())),
        }
        Ok(())
    }
}

impl Default for NoiseNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::buffer::ImageBuffer;
    use crate::graph::pin::Pin;

    fn run(node: &mut NoiseNode, input: &ImageBuffer) -> ImageBuffer {
        let mut inputs = vec![Pin::from_descriptor(&PINS[0])];
        inputs[0].data = Some(input.clone());
        let mut outputs = vec![Pin::from_descriptor(&PINS[1])];
        let mut ctx = NodeContext {
            inputs: &inputs,
            outputs: &mut outputs,
        };
        node.process(&mut ctx).unwrap();
        outputs[0].data.take().unwrap()
    }

    #[test]
    fn test_noise_is_repeatable() {
        let mut node = NoiseNode::with_seed(7);
        let input = ImageBuffer::filled(8, 8, 1, 0.5);
        assert_eq!(run(&mut node, &input), run(&mut node, &input));
    }

    #[test]
    fn test_noise_bounded() {
        let mut node = NoiseNode::with_seed(1);
        node.set_param("amount", &ParamValue::Float(0.05)).unwrap();
        let out = run(&mut node, &ImageBuffer::filled(8, 8, 1, 0.5));
        assert!(out.as_slice().iter().all(|v| (v - 0.5).abs() <= 0.05 + 1e-6));
    }

    #[test]
    fn test_zero_amount_passthrough() {
        let mut node = NoiseNode::new();
        node.set_param("amount", &ParamValue::Float(0.0)).unwrap();
        let input = ImageBuffer::filled(2, 2, 3, 0.3);
        assert_eq!(run(&mut node, &input), input);
    }

    #[test]
    fn test_amount_range_is_enforced() {
        let mut node = NoiseNode::new();
        for bad in [-0.1, f32::MAX as f64, 1e40, f64::INFINITY, f64::NAN] {
            assert!(
                matches!(
                    node.set_param("amount", &ParamValue::Float(bad)),
                    Err(NodeError::InvalidParam { .. })
                ),
                "amount {} accepted",
                bad
            );
        }
        assert!(node
            .set_param("amount", &ParamValue::Float(MAX_NOISE_AMOUNT as f64))
            .is_ok());

        // The largest accepted amount still samples without trouble.
        let out = run(&mut node, &ImageBuffer::filled(4, 4, 1, 0.0));
        assert!(out.as_slice().iter().all(|v| v.is_finite()));
        assert_eq!(node.params()[0], ("amount", ParamValue::Float(MAX_NOISE_AMOUNT as f64)));
    }
}
