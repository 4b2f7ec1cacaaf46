use bytemuck::{Pod, Zeroable};
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Packed `0xAARRGGBB` color.
///
/// Laid out as a bare `u32`, so a `&[Color]` can be handed to a GPU upload or
/// an image encoder as bytes. In little-endian memory the channel order is
/// B, G, R, A.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Value a ray miss resolves to. Fully transparent, so it can never be
    /// confused with a shaded hit, which is always opaque.
    pub const BACKGROUND: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xff00_0000);
    pub const WHITE: Color = Color(0xffff_ffff);

    const ALPHA_MASK: u32 = 0xff00_0000;

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Self::ALPHA_MASK | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn is_opaque(self) -> bool {
        self.a() == 0xff
    }

    /// Scale the color channels by `factor` (truncating), forcing alpha opaque.
    ///
    /// `factor` is clamped to `[0, 1]`; NaN scales to black.
    pub fn attenuate(self, factor: f32) -> Self {
        let factor = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        };
        let scale = |channel: u8| (channel as f32 * factor) as u8;
        Self::from_rgb(scale(self.r()), scale(self.g()), scale(self.b()))
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// A grid axis. Used to record the direction of the last traversal step,
/// which identifies the struck voxel face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index (`0`, `1`, `2`) for indexing vectors.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit integer vector along this axis.
    pub const fn unit(self) -> IVec3 {
        match self {
            Axis::X => IVec3::X,
            Axis::Y => IVec3::Y,
            Axis::Z => IVec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgb_packs_argb() {
        let c = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!(c.0, 0xff12_3456);
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (0xff, 0x12, 0x34, 0x56));
        assert!(c.is_opaque());
    }

    #[test]
    fn background_is_transparent() {
        assert!(!Color::BACKGROUND.is_opaque());
        assert_ne!(Color::BACKGROUND, Color::BLACK);
    }

    #[test]
    fn attenuate_truncates_channels() {
        let c = Color::from_rgb(255, 100, 3).attenuate(0.5);
        assert_eq!((c.r(), c.g(), c.b()), (127, 50, 1));
        assert!(c.is_opaque());
    }

    #[test]
    fn attenuate_clamps_factor() {
        let c = Color::from_rgb(10, 20, 30);
        assert_eq!(c.attenuate(2.0), c);
        assert_eq!(c.attenuate(-1.0), Color::BLACK);
        assert_eq!(c.attenuate(f32::NAN), Color::BLACK);
    }

    #[test]
    fn attenuate_forces_opaque() {
        assert!(Color(0x0080_8080).attenuate(1.0).is_opaque());
    }

    #[test]
    fn color_slice_casts_to_bgra_bytes() {
        let pixels = [Color::from_rgb(1, 2, 3)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes.len(), 4);
        if cfg!(target_endian = "little") {
            assert_eq!(bytes, &[3, 2, 1, 0xff]);
        }
    }

    #[test]
    fn axis_index_and_unit_agree() {
        for axis in Axis::ALL {
            assert_eq!(axis.unit()[axis.index()], 1);
        }
    }
}
