use glam::IVec3;
use minetrace_kernel::VoxelGrid;

/// Grid inspector for developer tooling.
///
/// Read-only queries against a voxel grid for debugging and CLI output.
pub struct GridInspector;

impl GridInspector {
    /// Produce a summary of the grid contents.
    pub fn summary(grid: &VoxelGrid) -> GridSummary {
        GridSummary {
            size: grid.size(),
            voxel_count: grid.voxel_count(),
            solid_count: grid.solid_count(),
            density: grid.density(),
        }
    }

    /// Solid voxels in one horizontal layer, counting wrapped `y`.
    pub fn layer_solid_count(grid: &VoxelGrid, y: i32) -> usize {
        let size = grid.size() as i32;
        (0..size)
            .flat_map(|z| (0..size).map(move |x| IVec3::new(x, y, z)))
            .filter(|&p| grid.query(p))
            .count()
    }
}

/// Summary of grid contents for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    pub size: usize,
    pub voxel_count: usize,
    pub solid_count: usize,
    pub density: f64,
}

impl std::fmt::Display for GridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid: {size}^3 voxels={} solid={} density={:.3}",
            self.voxel_count,
            self.solid_count,
            self.density,
            size = self.size
        )
    }
}
