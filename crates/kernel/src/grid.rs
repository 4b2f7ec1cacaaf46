use glam::IVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Largest supported grid edge length.
pub const MAX_GRID_SIZE: usize = 512;

/// Errors from grid construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridError {
    #[error("grid size {0} must be a power of two between 1 and 512")]
    Size(usize),
    #[error("grid density {0} must be within [0, 1]")]
    Density(f64),
}

/// Parameters for generating a random grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length in voxels. Must be a power of two.
    pub size: usize,
    /// Probability of each voxel being solid.
    pub density: f64,
    /// RNG seed; the same seed always produces the same grid.
    pub seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 32,
            density: 0.1,
            seed: 42,
        }
    }
}

impl GridConfig {
    pub fn build(&self) -> Result<VoxelGrid, GridError> {
        VoxelGrid::generate(self.size, self.density, self.seed)
    }
}

/// A cube of `size³` occupancy flags that repeats infinitely along every axis.
///
/// `size` is a power of two, so wrapping a coordinate is a single mask
/// (`coord & (size - 1)`), which also maps negative coordinates correctly.
/// The grid is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    size: usize,
    mask: i32,
    cells: Vec<bool>,
}

impl VoxelGrid {
    /// Fill each cell independently: solid with probability `density`.
    pub fn generate(size: usize, density: f64, seed: u64) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::Density(density));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Self::from_fn(size, |_| rng.gen_bool(density))?;
        tracing::info!(
            size,
            density,
            seed,
            solid = grid.solid_count(),
            "voxel grid generated"
        );
        Ok(grid)
    }

    /// Every cell solid.
    pub fn filled(size: usize) -> Result<Self, GridError> {
        Self::from_fn(size, |_| true)
    }

    /// Every cell empty.
    pub fn empty(size: usize) -> Result<Self, GridError> {
        Self::from_fn(size, |_| false)
    }

    /// Build a grid by evaluating `solid` at every cell position in
    /// `[0, size)³`.
    pub fn from_fn(
        size: usize,
        mut solid: impl FnMut(IVec3) -> bool,
    ) -> Result<Self, GridError> {
        if size == 0 || !size.is_power_of_two() || size > MAX_GRID_SIZE {
            return Err(GridError::Size(size));
        }
        let edge = size as i32;
        let mut cells = Vec::with_capacity(size * size * size);
        for z in 0..edge {
            for y in 0..edge {
                for x in 0..edge {
                    cells.push(solid(IVec3::new(x, y, z)));
                }
            }
        }
        Ok(Self {
            size,
            mask: edge - 1,
            cells,
        })
    }

    /// Edge length in voxels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the voxel at `position` is solid, wrapping every axis.
    pub fn query(&self, position: IVec3) -> bool {
        let x = (position.x & self.mask) as usize;
        let y = (position.y & self.mask) as usize;
        let z = (position.z & self.mask) as usize;
        self.cells[x + y * self.size + z * self.size * self.size]
    }

    /// Number of solid voxels in one period of the grid.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    /// Total number of voxels in one period of the grid.
    pub fn voxel_count(&self) -> usize {
        self.cells.len()
    }

    /// Observed fraction of solid voxels.
    pub fn density(&self) -> f64 {
        self.solid_count() as f64 / self.voxel_count() as f64
    }
}
