/// Pixel rectangle inside a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest rectangle with the frame's aspect ratio that fits the surface,
/// centered. The leftover bands stay at the clear color.
///
/// Returns `None` when either size is degenerate.
pub fn letterbox(frame: (u32, u32), surface: (u32, u32)) -> Option<Viewport> {
    let (fw, fh) = frame;
    let (sw, sh) = surface;
    if fw == 0 || fh == 0 || sw == 0 || sh == 0 {
        return None;
    }
    let scale = (sw as f32 / fw as f32).min(sh as f32 / fh as f32);
    let width = (fw as f32 * scale).min(sw as f32);
    let height = (fh as f32 * scale).min(sh as f32);
    Some(Viewport {
        x: ((sw as f32 - width) * 0.5).floor(),
        y: ((sh as f32 - height) * 0.5).floor(),
        width,
        height,
    })
}
