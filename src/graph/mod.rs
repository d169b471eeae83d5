//! Node-based image-processing graph.
//!
//! Image buffers flow through typed nodes: Source (`ImageInput`, `Noise` over
//! its input) → Transform (blur, threshold, convolution, ...) → Sink (`Output`).
//! Evaluation is single-threaded and pulls dependencies on demand.
//!
//! # Architecture
//!
//! ```text
//! [ImageInput] ──► [BrightnessContrast] ──► [Convolution] ──► [Output]
//!              └──► [ColorChannelSplitter] ─┬─► Red
//!                                           ├─► Green
//!                                           └─► Blue
//! ```
//!
//! # Design
//!
//! - **Enum dispatch**: `BuiltinNode` enum for all built-in node kinds.
//! - **Graph-wide IDs**: nodes and pins draw from one monotonic counter,
//!   so a pin ID alone identifies a link endpoint.
//! - **Value handoff**: every buffer crossing a connection is deep-copied;
//!   no two pins ever share storage.
//! - **Self-healing**: connections with vanished endpoints are pruned at the
//!   start of each pass, and cycle-closing connections are dropped.

pub mod buffer;
pub mod connection;
pub mod error;
pub mod evaluator;
pub mod event;
#[allow(clippy::module_inception)]
pub mod graph;
pub mod id;
pub mod node;
pub mod node_type;
pub mod nodes;
pub mod param;
pub mod pin;
pub mod snapshot;

pub use buffer::ImageBuffer;
pub use connection::Connection;
pub use error::{GraphError, GraphResult, NodeError, NodeResult};
pub use evaluator::{EvalReport, Evaluator};
pub use event::EditorEvent;
pub use graph::Graph;
pub use id::{IdAllocator, NodeId, PinId};
pub use node::{BuiltinNode, Node, NodeContext, NodeFactory};
pub use node_type::NodeType;
pub use param::ParamValue;
pub use pin::{Pin, PinDescriptor, PinDirection};
pub use snapshot::{LinkSnapshot, NodeSnapshot, PinSnapshot, TopologySnapshot};
