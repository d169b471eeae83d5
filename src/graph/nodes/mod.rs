//! Built-in node implementations.

pub mod blend;
pub mod blur;
pub mod brightness_contrast;
pub mod channel_splitter;
pub mod convolution;
pub mod edge_detection;
pub mod image_input;
pub mod noise;
pub mod output;
pub mod threshold;

pub use blend::BlendNode;
pub use blur::BlurNode;
pub use brightness_contrast::BrightnessContrastNode;
pub use channel_splitter::ChannelSplitterNode;
pub use convolution::ConvolutionNode;
pub use edge_detection::EdgeDetectionNode;
pub use image_input::ImageInputNode;
pub use noise::NoiseNode;
pub use output::OutputNode;
pub use threshold::ThresholdNode;
