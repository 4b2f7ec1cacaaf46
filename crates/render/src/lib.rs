//! CPU voxel renderer.
//!
//! For every pixel a ray is cast through the periodic voxel grid; the first
//! solid voxel is textured from the block atlas, fogged by distance and
//! written into a caller-owned frame buffer.
//!
//! # Invariants
//! - The renderer never resizes or reallocates the caller's buffer and never
//!   writes outside its `width * height` cells.
//! - Grid and atlas are read-only while a frame is drawn; the frame clock
//!   advances exactly once per rendered frame.
//! - Degenerate rays (zero direction components, nothing within range)
//!   resolve to the background, never to a panic or an endless walk.

mod camera;
mod config;
mod error;
mod frame;
pub mod raycast;
mod renderer;

pub use camera::{CAMERA_START, FOCAL_LENGTH, VIEWPORT_HEIGHT, ViewportCamera, YAW_AMPLITUDE};
pub use config::RenderConfig;
pub use error::{ConfigError, RenderError};
pub use frame::{Frame, FrameBuffer};
pub use raycast::{RANGE, RayHit, Trace, cast, trace};
pub use renderer::{Renderer, VoxelRenderer};

pub fn crate_info() -> &'static str {
    "minetrace-render v0.1.0"
}
