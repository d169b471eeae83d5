//! Node type enumeration for node creation.
//!
//! The closed set of kinds the editor can place. Parsing a kind from a tag
//! is the only place an unknown kind can appear, and it is rejected there.

use crate::graph::error::GraphError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Types of nodes that can be added to a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    // Sources
    ImageInput,

    // Sinks
    Output,

    // Transforms
    BrightnessContrast,
    ColorChannelSplitter,
    Blur,
    Threshold,
    EdgeDetection,
    Blend,
    Noise,
    Convolution,
}

impl NodeType {
    /// Get the display name for this node type.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeType::ImageInput => "Image Input",
            NodeType::Output => "Output",
            NodeType::BrightnessContrast => "Brightness/Contrast",
            NodeType::ColorChannelSplitter => "Channel Splitter",
            NodeType::Blur => "Blur",
            NodeType::Threshold => "Threshold",
            NodeType::EdgeDetection => "Edge Detection",
            NodeType::Blend => "Blend",
            NodeType::Noise => "Noise",
            NodeType::Convolution => "Convolution",
        }
    }

    /// Get all available node types.
    pub fn all() -> &'static [NodeType] {
        &[
            NodeType::ImageInput,
            NodeType::Output,
            NodeType::BrightnessContrast,
            NodeType::ColorChannelSplitter,
            NodeType::Blur,
            NodeType::Threshold,
            NodeType::EdgeDetection,
            NodeType::Blend,
            NodeType::Noise,
            NodeType::Convolution,
        ]
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for NodeType {
    type Err = GraphError;

    /// Accepts the variant name or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NodeType::all()
            .iter()
            .copied()
            .find(|t| {
                format!("{:?}", t).eq_ignore_ascii_case(wanted)
                    || t.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| GraphError::UnknownNodeKind(s.to_string()))
    }
}
