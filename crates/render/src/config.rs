use crate::error::ConfigError;
use minetrace_common::Color;
use minetrace_kernel::{DEFAULT_START_FRAME, GridConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed to start a [`VoxelRenderer`](crate::VoxelRenderer).
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Block atlas to load at startup.
    pub texture_path: PathBuf,
    /// Voxel world generation parameters.
    pub grid: GridConfig,
    /// Spread rows across the rayon thread pool.
    pub parallel: bool,
    /// Written for rays that hit nothing.
    pub background: Color,
    /// Frame counter value before the first rendered frame.
    pub start_frame: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("blocks.ppm"),
            grid: GridConfig::default(),
            parallel: true,
            background: Color::BACKGROUND,
            start_frame: DEFAULT_START_FRAME,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "render config loaded");
        Ok(config)
    }
}
