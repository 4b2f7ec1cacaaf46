//! Developer tooling: frame timing, grid inspection and frame export.
//!
//! Nothing here is needed to render a frame; hosts and the CLI pull these in
//! for diagnostics.

mod inspector;
mod ppm;
mod timer;

pub use inspector::{GridInspector, GridSummary};
pub use ppm::{encode_ppm, write_ppm};
pub use timer::{FrameTimer, as_millis_f32};

pub fn crate_info() -> &'static str {
    "minetrace-tools v0.1.0"
}
