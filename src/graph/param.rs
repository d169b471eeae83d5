//! Parameter values exchanged with the node parameter UI.

use crate::graph::error::{NodeError, NodeResult};

/// A value a node parameter can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    FloatList(Vec<f64>),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Floats, and ints widened to float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_float_list(&self) -> Option<&[f64]> {
        match self {
            ParamValue::FloatList(v) => Some(v),
            _ => None,
        }
    }
}

/// Read `value` as a finite `f32` or fail with `InvalidParam` naming `key`.
///
/// Values outside the `f32` range would become infinite and are rejected.
pub(crate) fn expect_float(key: &str, value: &ParamValue) -> NodeResult<f32> {
    let v = value.as_float().ok_or_else(|| NodeError::InvalidParam {
        key: key.to_string(),
        reason: format!("expected a number, got {:?}", value),
    })? as f32;
    if !v.is_finite() {
        return Err(NodeError::InvalidParam {
            key: key.to_string(),
            reason: format!("expected a finite number, got {:?}", value),
        });
    }
    Ok(v)
}

/// Read `value` as a non-negative integer or fail with `InvalidParam` naming `key`.
pub(crate) fn expect_usize(key: &str, value: &ParamValue) -> NodeResult<usize> {
    match value.as_int() {
        Some(v) if v >= 0 => Ok(v as usize),
        _ => Err(NodeError::InvalidParam {
            key: key.to_string(),
            reason: format!("expected a non-negative integer, got {:?}", value),
        }),
    }
}
