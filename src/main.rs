//! PixelFlow - Main Entry Point
//!
//! Headless driver: builds a small demo graph, evaluates it, and logs the
//! result. Pass a config file path as the first argument to override the
//! stored editor config.

use anyhow::Context;
use pixelflow::{
    config::{self, EditorConfig},
    graph::{EditorEvent, Graph, NodeId, NodeType, ParamValue, PinId},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EditorConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => EditorConfig::load_or_default(),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PixelFlow");

    // First run: write the defaults so there is a file to edit.
    if config::config_path().is_some_and(|p| !p.exists()) {
        match config.save() {
            Ok(()) => tracing::info!("Wrote default config to {:?}", config::config_path()),
            Err(e) => tracing::warn!("Failed to write default config: {}", e),
        }
    }

    let mut graph = Graph::with_config(&config);
    build_demo(&mut graph)?;

    let report = graph.evaluate().clone();
    tracing::info!(
        "Evaluated {} nodes ({} failures)",
        report.order.len(),
        report.failures.len()
    );
    for error in report.errors() {
        tracing::warn!("{}", error);
    }
    for line in graph.describe_connections() {
        tracing::info!("{}", line);
    }

    match graph.output_image() {
        Some(image) => {
            let mean = image.as_slice().iter().sum::<f32>() / image.as_slice().len().max(1) as f32;
            tracing::info!(
                "Output: {}x{}x{}, mean value {:.4}",
                image.width(),
                image.height(),
                image.channels(),
                mean
            );
        }
        None => tracing::warn!("Output node produced no image"),
    }

    // Simulate the user deleting the blur node; the graph heals itself.
    if let Some(blur) = graph
        .nodes()
        .iter()
        .find(|n| n.node_type() == NodeType::Blur)
        .map(|n| n.id)
    {
        graph.apply_event(EditorEvent::NodeDeleted(blur));
        tracing::info!(
            "After removing blur: {} connections, output present: {}",
            graph.connections().len(),
            graph.output_image().is_some()
        );
    }

    tracing::info!("Shutting down...");
    Ok(())
}

/// ImageInput → BrightnessContrast → Blur → Output, plus a channel splitter
/// hanging off the source.
fn build_demo(graph: &mut Graph) -> anyhow::Result<()> {
    let src = graph.add_node(NodeType::ImageInput);
    let adjust = graph.add_node(NodeType::BrightnessContrast);
    let blur = graph.add_node(NodeType::Blur);
    let out = graph.add_node(NodeType::Output);
    let split = graph.add_node(NodeType::ColorChannelSplitter);

    graph.set_param(src, "fill", &ParamValue::Float(0.4))?;
    graph.set_param(adjust, "contrast", &ParamValue::Float(1.5))?;
    graph.set_param(blur, "radius", &ParamValue::Int(2))?;

    link(graph, src, adjust)?;
    link(graph, adjust, blur)?;
    link(graph, blur, out)?;
    link(graph, src, split)?;
    Ok(())
}

/// Connect the first output of `from` to the first input of `to`.
fn link(graph: &mut Graph, from: NodeId, to: NodeId) -> anyhow::Result<usize> {
    let output: PinId = graph
        .find_node(from)
        .and_then(|n| n.outputs.first())
        .map(|p| p.id)
        .context("Producer has no output pin")?;
    let input: PinId = graph
        .find_node(to)
        .and_then(|n| n.inputs.first())
        .map(|p| p.id)
        .context("Consumer has no input pin")?;
    Ok(graph.connect(output, input)?)
}
