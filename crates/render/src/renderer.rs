use crate::camera::ViewportCamera;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::frame::FrameBuffer;
use crate::raycast::cast;
use minetrace_assets::Texture;
use minetrace_common::Color;
use minetrace_kernel::{FrameClock, VoxelGrid};
use rayon::prelude::*;

/// Renderer-agnostic interface. Hosts drive any renderer through this trait.
///
/// Each call produces one complete frame in the caller's buffer.
pub trait Renderer {
    /// Render the next frame into `frame`.
    fn render(&mut self, frame: &mut FrameBuffer<'_>);
}

/// CPU voxel ray caster.
///
/// Owns the voxel grid, the block atlas and the frame clock. The grid and the
/// atlas are read-only while a frame is drawn; only the clock changes between
/// frames.
#[derive(Debug)]
pub struct VoxelRenderer {
    grid: VoxelGrid,
    texture: Texture,
    clock: FrameClock,
    background: Color,
    parallel: bool,
}

impl VoxelRenderer {
    /// Load the atlas and generate the world. Any failure here is fatal for
    /// the host: there is no fallback texture or grid.
    pub fn start(config: &RenderConfig) -> Result<Self, RenderError> {
        let texture = Texture::load(&config.texture_path)?;
        let grid = config.grid.build()?;
        let renderer = Self::from_parts(grid, texture, config);
        tracing::info!(
            grid_size = renderer.grid.size(),
            parallel = renderer.parallel,
            "renderer started"
        );
        Ok(renderer)
    }

    /// Assemble a renderer from an already built grid and atlas.
    pub fn from_parts(grid: VoxelGrid, texture: Texture, config: &RenderConfig) -> Self {
        Self {
            grid,
            texture,
            clock: FrameClock::starting_at(config.start_frame),
            background: config.background,
            parallel: config.parallel,
        }
    }

    /// Release the grid and atlas.
    pub fn end(self) {
        tracing::info!(frames = self.clock.frame(), "renderer ended");
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Draw the scene at animation time `time` without touching the clock.
    ///
    /// Every pixel is independent; rows are split across the rayon pool when
    /// parallel rendering is enabled, with identical output either way.
    pub fn draw(&self, frame: &mut FrameBuffer<'_>, time: f32) {
        if frame.is_empty() {
            return;
        }
        let width = frame.width();
        let camera = ViewportCamera::at_time(time, width, frame.height());
        let rows = frame.pixels_mut();

        if self.parallel {
            rows.par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| self.draw_row(&camera, y, row));
        } else {
            rows.chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| self.draw_row(&camera, y, row));
        }
    }

    fn draw_row(&self, camera: &ViewportCamera, y: usize, row: &mut [Color]) {
        for (x, pixel) in row.iter_mut().enumerate() {
            let direction = camera.ray_direction(x, y);
            *pixel = cast(&self.grid, &self.texture, camera.origin, direction)
                .unwrap_or(self.background);
        }
    }
}

impl Renderer for VoxelRenderer {
    fn render(&mut self, frame: &mut FrameBuffer<'_>) {
        let time = self.clock.advance();
        let _span = tracing::info_span!("render_frame", frame = self.clock.frame()).entered();
        self.draw(frame, time);
        tracing::trace!(
            width = frame.width(),
            height = frame.height(),
            time,
            "frame rendered"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use minetrace_assets::{TEXTURE_HEIGHT, TEXTURE_WIDTH};
    use std::io::Write;

    fn test_texture() -> Texture {
        let pixels = (0..TEXTURE_WIDTH * TEXTURE_HEIGHT)
            .map(|i| Color::from_rgb((i % 256) as u8, (i / 256) as u8 * 4, 200))
            .collect();
        Texture::from_pixels(TEXTURE_WIDTH, TEXTURE_HEIGHT, pixels).unwrap()
    }

    fn renderer_with(grid: VoxelGrid, config: &RenderConfig) -> VoxelRenderer {
        VoxelRenderer::from_parts(grid, test_texture(), config)
    }

    #[test]
    fn render_advances_clock_once_per_frame() {
        let config = RenderConfig::default();
        let mut renderer = renderer_with(VoxelGrid::empty(8).unwrap(), &config);
        let mut frame = Frame::new(8, 6);
        renderer.render(&mut frame.as_buffer());
        assert_eq!(renderer.clock().frame(), config.start_frame + 1);
        renderer.render(&mut frame.as_buffer());
        renderer.render(&mut frame.as_buffer());
        assert_eq!(renderer.clock().frame(), config.start_frame + 3);
    }

    #[test]
    fn empty_world_renders_background() {
        let sky = Color::from_rgb(90, 140, 220);
        let config = RenderConfig {
            background: sky,
            ..RenderConfig::default()
        };
        let mut renderer = renderer_with(VoxelGrid::empty(32).unwrap(), &config);
        let mut frame = Frame::new(16, 12);
        renderer.render(&mut frame.as_buffer());
        assert!(frame.pixels().iter().all(|&c| c == sky));
    }

    #[test]
    fn default_background_is_transparent() {
        let mut renderer =
            renderer_with(VoxelGrid::empty(32).unwrap(), &RenderConfig::default());
        let mut frame = Frame::new(4, 4);
        renderer.render(&mut frame.as_buffer());
        assert!(frame.pixels().iter().all(|&c| c == Color::BACKGROUND));
    }

    #[test]
    fn camera_inside_solid_world_sees_opaque_texels() {
        let mut renderer =
            renderer_with(VoxelGrid::filled(32).unwrap(), &RenderConfig::default());
        let mut frame = Frame::new(10, 10);
        renderer.render(&mut frame.as_buffer());
        assert!(frame.pixels().iter().all(|c| c.is_opaque()));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let grid = VoxelGrid::generate(32, 0.1, 42).unwrap();
        let parallel = renderer_with(grid.clone(), &RenderConfig::default());
        let sequential = renderer_with(
            grid,
            &RenderConfig {
                parallel: false,
                ..RenderConfig::default()
            },
        );

        let mut a = Frame::new(64, 48);
        let mut b = Frame::new(64, 48);
        parallel.draw(&mut a.as_buffer(), 5.0);
        sequential.draw(&mut b.as_buffer(), 5.0);
        assert_eq!(a, b);
        assert!(a.pixels().iter().any(|c| c.is_opaque()));
    }

    #[test]
    fn pixels_follow_row_major_layout() {
        let grid = VoxelGrid::generate(32, 0.1, 3).unwrap();
        let renderer = renderer_with(grid, &RenderConfig::default());
        let mut frame = Frame::new(20, 10);
        renderer.draw(&mut frame.as_buffer(), 2.0);

        let camera = ViewportCamera::at_time(2.0, 20, 10);
        for (x, y) in [(0, 0), (19, 0), (7, 3), (19, 9)] {
            let expected = cast(
                renderer.grid(),
                renderer.texture(),
                camera.origin,
                camera.ray_direction(x, y),
            )
            .unwrap_or(Color::BACKGROUND);
            assert_eq!(frame.pixel(x, y), Some(expected));
        }
    }

    #[test]
    fn empty_frame_is_a_no_op() {
        let mut renderer =
            renderer_with(VoxelGrid::filled(8).unwrap(), &RenderConfig::default());
        let mut pixels: Vec<Color> = Vec::new();
        let mut buffer = FrameBuffer::new(0, 240, &mut pixels).unwrap();
        renderer.render(&mut buffer);
        assert_eq!(renderer.clock().frame(), 100);
    }

    #[test]
    fn instances_are_independent() {
        let config = RenderConfig::default();
        let mut a = renderer_with(VoxelGrid::empty(8).unwrap(), &config);
        let b = renderer_with(VoxelGrid::filled(8).unwrap(), &config);
        let mut frame = Frame::new(2, 2);
        a.render(&mut frame.as_buffer());
        assert_eq!(a.clock().frame(), 100);
        assert_eq!(b.clock().frame(), 99);
        b.end();
        a.end();
    }

    #[test]
    fn drives_through_trait_object() {
        let mut renderer: Box<dyn Renderer> = Box::new(renderer_with(
            VoxelGrid::filled(8).unwrap(),
            &RenderConfig::default(),
        ));
        let mut frame = Frame::new(3, 3);
        renderer.render(&mut frame.as_buffer());
        assert!(frame.pixels().iter().all(|c| c.is_opaque()));
    }

    #[test]
    fn start_fails_on_missing_texture() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            texture_path: dir.path().join("missing.ppm"),
            ..RenderConfig::default()
        };
        let err = VoxelRenderer::start(&config).unwrap_err();
        assert!(matches!(err, RenderError::Asset(_)));
        assert!(err.to_string().contains("missing.ppm"));
    }

    #[test]
    fn start_loads_texture_and_grid() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"P6\n256 64\n255\n").unwrap();
        tmp.write_all(&vec![128u8; TEXTURE_WIDTH * TEXTURE_HEIGHT * 3])
            .unwrap();

        let config = RenderConfig {
            texture_path: tmp.path().to_path_buf(),
            ..RenderConfig::default()
        };
        let renderer = VoxelRenderer::start(&config).unwrap();
        assert_eq!(renderer.grid().size(), 32);
        assert_eq!(renderer.texture().pixels()[0], Color::from_rgb(128, 128, 128));
        renderer.end();
    }

    #[test]
    fn start_rejects_bad_grid() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"P6\n256 64\n255\n").unwrap();
        tmp.write_all(&vec![0u8; TEXTURE_WIDTH * TEXTURE_HEIGHT * 3])
            .unwrap();

        let mut config = RenderConfig {
            texture_path: tmp.path().to_path_buf(),
            ..RenderConfig::default()
        };
        config.grid.size = 33;
        let err = VoxelRenderer::start(&config).unwrap_err();
        assert!(matches!(err, RenderError::Grid(_)));
    }
}
