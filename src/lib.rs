//! # PixelFlow: Node-Based Image Processing
//!
//! The graph model and evaluator behind a node editor for image processing.
//! Users place nodes, wire output pins to input pins, and tweak parameters;
//! the graph re-evaluates in dependency order and the `Output` node holds the
//! final image.
//!
//! ## Architecture
//!
//! - **Graph**: owns nodes and connections, allocates IDs, applies UI events
//! - **Evaluator**: one depth-first pass with pruning and cycle rejection
//! - **Nodes**: ten built-in kinds dispatched through `BuiltinNode`
//! - **Config**: JSON editor settings in the platform data directory
//!
//! Rendering and interaction live outside this crate. A UI layer reads
//! `Graph::snapshot` each frame and feeds gestures back as `EditorEvent`s.
//!
//! ## Example
//!
//! ```ignore
//! use pixelflow::{EditorConfig, Graph, NodeType};
//!
//! let config = EditorConfig::load_or_default();
//! let mut graph = Graph::with_config(&config);
//! let src = graph.add_node(NodeType::ImageInput);
//! let out = graph.add_node(NodeType::Output);
//! let from = graph.find_node(src).unwrap().outputs[0].id;
//! let to = graph.find_node(out).unwrap().inputs[0].id;
//! graph.connect(from, to)?;
//! graph.evaluate();
//! ```

pub mod config;
pub mod error;
pub mod graph;

// Re-export commonly used types
pub use config::{EditorConfig, EvaluationConfig, FanInPolicy, NodeDefaults};
pub use error::{EditorError, Result};
pub use graph::{
    EditorEvent, EvalReport, Graph, GraphError, ImageBuffer, NodeId, NodeType, ParamValue, PinId,
};
