//! wgpu presentation backend for the voxel ray caster.
//!
//! The CPU renderer produces the image; this crate only uploads it to a
//! texture and draws it into a window surface, letterboxed to keep the frame's
//! aspect ratio.
//!
//! # Invariants
//! - Presentation never alters frame contents.
//! - Frame size is independent of the window size.

mod gpu;
mod letterbox;
mod shaders;

pub use gpu::FramePresenter;
pub use letterbox::{Viewport, letterbox};
