use crate::error::RenderError;
use minetrace_common::Color;

/// A caller-owned pixel buffer lent to the renderer for one frame.
///
/// Row-major, top-left origin, exactly `width * height` cells. The renderer
/// writes into it but never resizes or reallocates it.
#[derive(Debug)]
pub struct FrameBuffer<'a> {
    width: usize,
    height: usize,
    pixels: &'a mut [Color],
}

impl<'a> FrameBuffer<'a> {
    /// Wrap `pixels`, which must hold exactly `width * height` colors.
    pub fn new(
        width: usize,
        height: usize,
        pixels: &'a mut [Color],
    ) -> Result<Self, RenderError> {
        match width.checked_mul(height) {
            Some(len) if len == pixels.len() => Ok(Self {
                width,
                height,
                pixels,
            }),
            _ => Err(RenderError::FrameSize {
                width,
                height,
                actual: pixels.len(),
            }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &*self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut *self.pixels
    }
}

/// Owned pixel storage for hosts that don't bring their own buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Frame {
    /// A `width`×`height` frame cleared to [`Color::BACKGROUND`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BACKGROUND; width * height],
        }
    }

    /// Change the dimensions, clearing every pixel. Call between frames.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Color::BACKGROUND);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[x + y * self.width])
    }

    /// Lend the pixels as a [`FrameBuffer`].
    pub fn as_buffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer {
            width: self.width,
            height: self.height,
            pixels: &mut self.pixels,
        }
    }
}
