//! Configuration module for PixelFlow
//!
//! Editor settings persist as JSON in the platform-appropriate data directory:
//! - **Linux**: `~/.local/share/dev.hxyulin.pixelflow/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.pixelflow/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.pixelflow\`
//!
//! Every field has a serde default, so partial or older files still load.
//!
//! # Example
//!
//! ```ignore
//! use pixelflow::config::EditorConfig;
//! use pixelflow::graph::Graph;
//!
//! let config = EditorConfig::load_or_default();
//! let mut graph = Graph::with_config(&config);
//! ```

use crate::error::{EditorError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.pixelflow";

/// Config filename
pub const CONFIG_FILE: &str = "editor.json";

/// Default size of generated input images
pub const DEFAULT_IMAGE_SIZE: usize = 64;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,pixelflow=debug";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        EditorError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            EditorError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Evaluation ====================

/// What happens when a second connection targets an input pin that already
/// has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanInPolicy {
    /// Both connections are kept; the one later in the list wins at evaluation.
    #[default]
    LastWriteWins,
    /// `connect` refuses the second connection.
    RejectAtConnect,
}

/// Evaluation behaviour of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    #[serde(default)]
    pub fan_in: FanInPolicy,

    /// Re-evaluate after removals, disconnects and UI events
    #[serde(default = "default_true")]
    pub evaluate_on_mutation: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            fan_in: FanInPolicy::LastWriteWins,
            evaluate_on_mutation: true,
        }
    }
}

// ==================== Node Defaults ====================

/// Initial parameters for newly created nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefaults {
    #[serde(default = "default_image_size")]
    pub image_width: usize,

    #[serde(default = "default_image_size")]
    pub image_height: usize,

    #[serde(default)]
    pub noise_seed: u64,
}

fn default_image_size() -> usize {
    DEFAULT_IMAGE_SIZE
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            image_width: DEFAULT_IMAGE_SIZE,
            image_height: DEFAULT_IMAGE_SIZE,
            noise_seed: 0,
        }
    }
}

// ==================== Editor Config ====================

/// Persistent editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub defaults: NodeDefaults,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_config_version() -> u32 {
    1
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            evaluation: EvaluationConfig::default(),
            defaults: NodeDefaults::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl EditorConfig {
    /// Load config from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let path = config_path()
            .ok_or_else(|| EditorError::Config("Could not determine config path".to_string()))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load config from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EditorError::Config(format!("Failed to read config: {}", e)))?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| EditorError::Config(format!("Failed to parse config: {}", e)))?;

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| EditorError::Serialization(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(EditorError::from)
            .context("Failed to write config")
    }
}
