//! World kernel: the periodic voxel grid and the frame clock.
//!
//! # Invariants
//! - The grid edge length is a power of two; queries wrap by masking and
//!   never go out of bounds.
//! - The grid is immutable once generated; the frame clock is the only state
//!   that changes between frames.

mod clock;
mod grid;

pub use clock::{DEFAULT_START_FRAME, FrameClock, TIME_PER_FRAME};
pub use grid::{GridConfig, GridError, MAX_GRID_SIZE, VoxelGrid};

pub fn crate_info() -> &'static str {
    "minetrace-kernel v0.1.0"
}
