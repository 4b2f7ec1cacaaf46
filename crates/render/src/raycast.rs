//! Voxel traversal (3D DDA) against the periodic grid, plus face texturing and
//! distance fog for the first solid voxel hit.

use glam::{IVec3, Vec3};
use minetrace_assets::{TILE_SIZE, Texture};
use minetrace_common::{Axis, Color};
use minetrace_kernel::VoxelGrid;

/// Travelled distance after which a ray gives up.
pub const RANGE: f32 = 30.0;
/// Offset added to every ray origin so it never starts exactly on a voxel
/// boundary, where the struck face would be ambiguous.
pub const ORIGIN_BIAS: f32 = 1e-4;
/// Atlas tile used for every voxel face.
pub const FACE_TILE: usize = 0;

/// The first solid voxel along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Unwrapped voxel coordinate.
    pub voxel: IVec3,
    /// Axis of the last traversal step. A hit in the starting voxel reports `X`.
    pub axis: Axis,
    /// Distance travelled along the ray, in units of the direction vector.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Outcome of a traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trace {
    Hit(RayHit),
    /// Nothing solid within [`RANGE`]. `distance` is the last boundary crossed,
    /// at least `RANGE` (infinite for a zero direction).
    Miss { distance: f32 },
}

impl Trace {
    pub fn hit(&self) -> Option<&RayHit> {
        match self {
            Trace::Hit(hit) => Some(hit),
            Trace::Miss { .. } => None,
        }
    }

    pub fn distance(&self) -> f32 {
        match self {
            Trace::Hit(hit) => hit.distance,
            Trace::Miss { distance } => *distance,
        }
    }
}

/// Cast a ray and shade what it hits. `None` is the background.
pub fn cast(grid: &VoxelGrid, texture: &Texture, origin: Vec3, direction: Vec3) -> Option<Color> {
    trace(grid, origin, direction)
        .hit()
        .map(|hit| shade(texture, hit))
}

/// Walk the grid cell by cell from `origin` along `direction` until a solid
/// voxel is found or the travelled distance reaches [`RANGE`].
///
/// Zero direction components never advance: their boundary distance is
/// infinite, so they are never the closest axis.
pub fn trace(grid: &VoxelGrid, origin: Vec3, direction: Vec3) -> Trace {
    let start = origin + Vec3::splat(ORIGIN_BIAS);

    let step = IVec3::new(
        step_sign(direction.x),
        step_sign(direction.y),
        step_sign(direction.z),
    );
    let cost = Vec3::new(
        axis_cost(direction.x),
        axis_cost(direction.y),
        axis_cost(direction.z),
    );
    let mut next = Vec3::new(
        first_boundary(start.x, direction.x, cost.x),
        first_boundary(start.y, direction.y, cost.y),
        first_boundary(start.z, direction.z, cost.z),
    );

    let mut voxel = start.floor().as_ivec3();
    let mut distance = 0.0;
    let mut axis = Axis::X;
    let mut solid = grid.query(voxel);

    while !solid && distance < RANGE {
        axis = next_axis(next);
        let i = axis.index();
        distance = next[i];
        next[i] += cost[i];
        voxel[i] = voxel[i].wrapping_add(step[i]);
        solid = grid.query(voxel);
    }

    if !solid {
        return Trace::Miss { distance };
    }

    Trace::Hit(RayHit {
        voxel,
        axis,
        distance,
        point: start + direction * distance,
    })
}

/// Texture and fog a hit.
pub fn shade(texture: &Texture, hit: &RayHit) -> Color {
    let (u, v) = face_uv(hit.point, hit.axis);
    texture
        .tile_texel(FACE_TILE, u, v)
        .attenuate(fog(hit.distance))
}

/// Texel coordinates inside a face tile, both in `[0, TILE_SIZE)`.
///
/// Coordinates use the absolute hit point, so textures mirror around the
/// world origin. Top and bottom faces map `(x, z)`; side faces map
/// `(x + z, y)`.
pub fn face_uv(point: Vec3, axis: Axis) -> (usize, usize) {
    let p = point.abs();
    let (u, v) = match axis {
        Axis::Y => (p.x, p.z),
        Axis::X | Axis::Z => (p.x + p.z, p.y),
    };
    (tile_coord(u), tile_coord(v))
}

/// Linear fog factor: 1 at the eye, 0 at [`RANGE`] and beyond.
pub fn fog(distance: f32) -> f32 {
    (1.0 - distance / RANGE).max(0.0)
}

fn tile_coord(value: f32) -> usize {
    (value * TILE_SIZE as f32) as usize % TILE_SIZE
}

fn step_sign(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

/// Ray distance needed to cross one whole voxel along an axis.
fn axis_cost(d: f32) -> f32 {
    if d == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / d).abs()
    }
}

/// Ray distance from `s` to the first voxel boundary along an axis.
fn first_boundary(s: f32, d: f32, cost: f32) -> f32 {
    if cost.is_infinite() {
        f32::INFINITY
    } else if d > 0.0 {
        (s.ceil() - s) * cost
    } else {
        (s - s.floor()) * cost
    }
}

/// Axis with the closest boundary. Ties go to x, then y, then z.
fn next_axis(next: Vec3) -> Axis {
    if next.x <= next.y && next.x <= next.z {
        Axis::X
    } else if next.y <= next.z {
        Axis::Y
    } else {
        Axis::Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_ramp_tile() -> Texture {
        let pixels = (0..16 * 16).map(|i| Color::from_rgb(i as u8, 0, 0)).collect();
        Texture::from_pixels(16, 16, pixels).unwrap()
    }

    fn flat_texture(color: Color) -> Texture {
        Texture::from_pixels(16, 16, vec![color; 16 * 16]).unwrap()
    }

    fn hit_at(distance: f32) -> RayHit {
        RayHit {
            voxel: IVec3::ZERO,
            axis: Axis::Z,
            distance,
            point: Vec3::new(0.3, 0.6, 0.0),
        }
    }

    #[test]
    fn filled_grid_hits_immediately() {
        let grid = VoxelGrid::filled(32).unwrap();
        let trace = trace(&grid, Vec3::splat(0.5), Vec3::Z);
        let hit = trace.hit().expect("hit");
        assert_eq!(hit.voxel, IVec3::ZERO);
        assert_eq!(hit.axis, Axis::X);
        assert!(hit.distance.abs() < 1e-6);
    }

    #[test]
    fn empty_grid_misses_beyond_range() {
        let grid = VoxelGrid::empty(32).unwrap();
        let texture = flat_texture(Color::WHITE);
        for direction in [
            Vec3::Z,
            Vec3::NEG_X,
            Vec3::new(0.3, -0.5, 0.8).normalize(),
            Vec3::new(1.0, 1.0, 1.0).normalize(),
        ] {
            let trace = trace(&grid, Vec3::splat(50.5), direction);
            assert!(trace.hit().is_none());
            assert!(trace.distance() >= RANGE, "{direction:?}: {}", trace.distance());
            assert_eq!(cast(&grid, &texture, Vec3::splat(50.5), direction), None);
        }
    }

    #[test]
    fn zero_components_terminate() {
        let grid = VoxelGrid::empty(8).unwrap();
        for direction in [
            Vec3::new(1.0, 0.0, 1.0).normalize(),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.6, -0.8),
        ] {
            let trace = trace(&grid, Vec3::new(2.0, 3.0, 4.0), direction);
            assert!(matches!(trace, Trace::Miss { .. }));
            assert!(trace.distance().is_finite());
        }
    }

    #[test]
    fn zero_direction_misses() {
        let grid = VoxelGrid::empty(8).unwrap();
        let trace = trace(&grid, Vec3::splat(1.5), Vec3::ZERO);
        assert_eq!(trace, Trace::Miss { distance: f32::INFINITY });
    }

    #[test]
    fn nan_direction_terminates() {
        let grid = VoxelGrid::empty(8).unwrap();
        let trace = trace(&grid, Vec3::splat(1.5), Vec3::new(f32::NAN, 0.0, 1.0));
        assert!(trace.hit().is_none());
    }

    #[test]
    fn many_directions_terminate_on_sparse_grid() {
        let grid = VoxelGrid::generate(32, 0.02, 5).unwrap();
        for i in 0..64 {
            let a = i as f32 * 0.37;
            let direction = Vec3::new(a.cos(), (a * 1.7).sin(), (a * 0.3).sin()).normalize();
            let trace = trace(&grid, Vec3::new(50.5, 50.5, 50.5 + a), direction);
            match trace {
                Trace::Hit(hit) => assert!(hit.distance < RANGE + 2.0),
                Trace::Miss { distance } => assert!(distance >= RANGE),
            }
        }
    }

    #[test]
    fn hits_wall_ahead_on_z() {
        let grid = VoxelGrid::from_fn(32, |p| p.z == 5).unwrap();
        let hit = *trace(&grid, Vec3::splat(0.5), Vec3::Z).hit().unwrap();
        assert_eq!(hit.voxel, IVec3::new(0, 0, 5));
        assert_eq!(hit.axis, Axis::Z);
        assert!((hit.distance - 4.4999).abs() < 1e-3, "{}", hit.distance);
        assert!((hit.point.z - 5.0).abs() < 1e-3);
    }

    #[test]
    fn traversal_wraps_backwards() {
        let grid = VoxelGrid::from_fn(32, |p| p.x == 30).unwrap();
        let hit = *trace(&grid, Vec3::splat(0.5), Vec3::NEG_X).hit().unwrap();
        assert_eq!(hit.voxel, IVec3::new(-2, 0, 0));
        assert_eq!(hit.axis, Axis::X);
        assert!((hit.distance - 1.5001).abs() < 1e-3);
    }

    #[test]
    fn ties_step_x_before_y() {
        let grid = VoxelGrid::from_fn(8, |p| p == IVec3::new(1, 0, 0)).unwrap();
        let direction = Vec3::new(1.0, 1.0, 0.0).normalize();
        let hit = *trace(&grid, Vec3::splat(0.5), direction).hit().unwrap();
        assert_eq!(hit.voxel, IVec3::new(1, 0, 0));
        assert_eq!(hit.axis, Axis::X);
    }

    #[test]
    fn ties_step_y_before_z() {
        let grid = VoxelGrid::from_fn(8, |p| p == IVec3::new(0, 1, 0)).unwrap();
        let direction = Vec3::new(0.0, 1.0, 1.0).normalize();
        let hit = *trace(&grid, Vec3::splat(0.5), direction).hit().unwrap();
        assert_eq!(hit.voxel, IVec3::new(0, 1, 0));
        assert_eq!(hit.axis, Axis::Y);
    }

    #[test]
    fn immediate_hit_samples_side_face() {
        let grid = VoxelGrid::filled(32).unwrap();
        let texture = red_ramp_tile();
        // start = 0.5001: u = floor(1.0002 * 16) % 16 = 0, v = floor(8.0016) = 8
        let color = cast(&grid, &texture, Vec3::splat(0.5), Vec3::Z);
        assert_eq!(color, Some(Color::from_rgb(128, 0, 0)));
    }

    #[test]
    fn top_face_uses_x_and_z() {
        assert_eq!(face_uv(Vec3::new(1.25, 3.0, 2.5), Axis::Y), (4, 8));
        assert_eq!(face_uv(Vec3::new(-1.25, 3.0, -2.5), Axis::Y), (4, 8));
    }

    #[test]
    fn side_face_uses_x_plus_z_and_y() {
        assert_eq!(face_uv(Vec3::new(0.5, 0.25, 0.25), Axis::X), (12, 4));
        assert_eq!(face_uv(Vec3::new(0.5, 0.25, 0.25), Axis::Z), (12, 4));
    }

    #[test]
    fn uv_on_voxel_boundaries_stays_in_tile() {
        let points = [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 31.0, 32.0),
            Vec3::new(50.0, 50.0, 81.0),
            Vec3::new(0.9999999, 15.999999, -7.0),
            Vec3::splat(1.0e6),
        ];
        for point in points {
            for axis in Axis::ALL {
                let (u, v) = face_uv(point, axis);
                assert!(u < TILE_SIZE && v < TILE_SIZE, "{point:?} {axis:?}");
            }
        }
    }

    #[test]
    fn hits_on_boundaries_sample_inside_tile() {
        let grid = VoxelGrid::generate(32, 0.2, 11).unwrap();
        for i in 0..200 {
            let a = i as f32 * 0.113;
            let direction = Vec3::new(a.sin(), (a * 2.3).cos(), 1.0).normalize();
            if let Some(hit) = trace(&grid, Vec3::splat(50.5), direction).hit() {
                let (u, v) = face_uv(hit.point, hit.axis);
                assert!(u < TILE_SIZE && v < TILE_SIZE);
            }
        }
    }

    #[test]
    fn fog_falls_off_linearly() {
        assert_eq!(fog(0.0), 1.0);
        assert!((fog(15.0) - 0.5).abs() < 1e-6);
        assert_eq!(fog(RANGE), 0.0);
        assert_eq!(fog(45.0), 0.0);
    }

    #[test]
    fn fog_is_monotonic() {
        let texture = flat_texture(Color::from_rgb(200, 150, 100));
        let mut last = shade(&texture, &hit_at(0.0));
        for step in 1..=64 {
            let color = shade(&texture, &hit_at(step as f32 * 0.5));
            assert!(color.r() <= last.r());
            assert!(color.g() <= last.g());
            assert!(color.b() <= last.b());
            assert!(color.is_opaque());
            last = color;
        }
        assert_eq!(last, Color::BLACK);
    }
}
