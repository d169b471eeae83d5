//! Graph-specific error types.

use crate::graph::id::{NodeId, PinId};
use crate::graph::pin::PinDirection;
use thiserror::Error;

/// Errors raised by a node's own processing or parameter editing.
///
/// These never propagate past the node: the evaluator records them and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("No image loaded")]
    NoImage,

    #[error("Size mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    SizeMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("Channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error("Unknown parameter: {0}")]
    UnknownParam(String),

    #[error("Invalid value for parameter '{key}': {reason}")]
    InvalidParam { key: String, reason: String },
}

pub type NodeResult<T> = std::result::Result<T, NodeError>;

/// Errors that can occur while editing or evaluating a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0:?} not found")]
    NodeNotFound(NodeId),

    #[error("{direction:?} pin {pin:?} not found")]
    PinNotFound { pin: PinId, direction: PinDirection },

    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),

    #[error("Connection index {index} out of range ({len} connections)")]
    ConnectionIndexOutOfRange { index: usize, len: usize },

    #[error("Cycle detected at node {node:?}")]
    CycleDetected { node: NodeId },

    #[error("Input pin {pin:?} already has an incoming connection")]
    FanInRejected { pin: PinId },

    #[error("Node and pin IDs exhausted")]
    IdsExhausted,

    #[error("Node {node_id:?} error: {source}")]
    Node {
        node_id: NodeId,
        #[source]
        source: NodeError,
    },
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
