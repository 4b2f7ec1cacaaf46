use minetrace_assets::AssetError;
use minetrace_kernel::GridError;
use std::path::PathBuf;

/// Errors from starting a renderer or handing it a frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("texture: {0}")]
    Asset(#[from] AssetError),
    #[error("voxel grid: {0}")]
    Grid(#[from] GridError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("frame buffer holds {actual} pixels, expected {width}x{height}")]
    FrameSize {
        width: usize,
        height: usize,
        actual: usize,
    },
}

/// Errors from reading a render configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
