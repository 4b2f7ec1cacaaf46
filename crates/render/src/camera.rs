use glam::{Mat3, Vec3};

/// Viewport height in world units. Width follows the frame aspect ratio.
pub const VIEWPORT_HEIGHT: f32 = 2.0;
/// Distance from the eye to the viewport plane.
pub const FOCAL_LENGTH: f32 = 1.0;
/// Eye position at time zero.
pub const CAMERA_START: Vec3 = Vec3::new(50.5, 50.5, 50.5);
/// Peak yaw of the side-to-side sway, in radians.
pub const YAW_AMPLITUDE: f32 = 0.25;

/// Pinhole camera flying forward along +Z while gently swaying its yaw.
///
/// Rays are generated for a top-left pixel origin: row 0 is the top of the
/// image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportCamera {
    /// Eye position shared by every ray of the frame.
    pub origin: Vec3,
    /// Rotation about +Y, in radians.
    pub yaw: f32,
    viewport_width: f32,
    width: f32,
    height: f32,
    rotation: Mat3,
}

impl ViewportCamera {
    /// Camera for animation time `time` and a `width`×`height` frame.
    pub fn at_time(time: f32, width: usize, height: usize) -> Self {
        let yaw = time.sin() * YAW_AMPLITUDE;
        let aspect = width as f32 / height.max(1) as f32;
        Self {
            origin: CAMERA_START + Vec3::new(0.0, 0.0, time),
            yaw,
            viewport_width: aspect * VIEWPORT_HEIGHT,
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            rotation: Mat3::from_rotation_y(yaw),
        }
    }

    /// Unit direction of the ray through pixel `(x, y)`.
    pub fn ray_direction(&self, x: usize, y: usize) -> Vec3 {
        let u = x as f32 / self.width;
        let v = y as f32 / self.height;
        let through_viewport = Vec3::new(
            u * self.viewport_width - self.viewport_width * 0.5,
            VIEWPORT_HEIGHT * 0.5 - v * VIEWPORT_HEIGHT,
            FOCAL_LENGTH,
        );
        self.rotation * through_viewport.normalize()
    }
}
