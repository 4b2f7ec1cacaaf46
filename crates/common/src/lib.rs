//! Shared types for the minetrace voxel renderer.

mod types;

pub use types::{Axis, Color};

pub fn crate_info() -> &'static str {
    "minetrace-common v0.1.0"
}
