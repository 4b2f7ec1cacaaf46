//! Texture store: the block atlas used to skin voxel faces.
//!
//! The atlas is a binary PPM-style file: three newline-terminated header
//! lines, skipped verbatim, followed by raw `r g b` byte triplets in row-major
//! order. It is loaded once at startup and immutable afterwards.
//!
//! # Layout
//! The 256×64 atlas is cut into 16×16 face tiles, 16 per row, 4 rows.

use minetrace_common::Color;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Atlas width in pixels.
pub const TEXTURE_WIDTH: usize = 256;
/// Atlas height in pixels.
pub const TEXTURE_HEIGHT: usize = 64;
/// Edge length of one voxel face tile.
pub const TILE_SIZE: usize = 16;
/// Number of ASCII header lines preceding the pixel data.
pub const HEADER_LINES: usize = 3;

const _: () = assert!(TEXTURE_WIDTH % TILE_SIZE == 0);
const _: () = assert!(TEXTURE_HEIGHT % TILE_SIZE == 0);

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to open texture {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("texture header truncated: found {found} of 3 header lines")]
    Header { found: usize },
    #[error("texture pixel data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("invalid texture dimensions {width}x{height} for {len} pixels")]
    Dimensions {
        width: usize,
        height: usize,
        len: usize,
    },
}

/// An immutable atlas of opaque colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Texture {
    /// Load the standard 256×64 atlas from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AssetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let texture = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            width = texture.width,
            height = texture.height,
            "texture loaded"
        );
        Ok(texture)
    }

    /// Parse the standard 256×64 atlas from any byte source.
    ///
    /// Bytes after the pixel data are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AssetError> {
        let mut bytes = reader.bytes();

        let mut found = 0;
        while found < HEADER_LINES {
            match bytes.next() {
                Some(Ok(b'\n')) => found += 1,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Err(AssetError::Header { found }),
            }
        }

        let expected = TEXTURE_WIDTH * TEXTURE_HEIGHT * 3;
        let mut data = Vec::with_capacity(expected);
        for byte in bytes.take(expected) {
            data.push(byte?);
        }
        if data.len() < expected {
            return Err(AssetError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(3)
            .map(|rgb| Color::from_rgb(rgb[0], rgb[1], rgb[2]))
            .collect();
        Self::from_pixels(TEXTURE_WIDTH, TEXTURE_HEIGHT, pixels)
    }

    /// Build a texture from already decoded pixels.
    ///
    /// `width` and `height` must be multiples of [`TILE_SIZE`] and `pixels`
    /// must hold exactly `width * height` colors.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Color>,
    ) -> Result<Self, AssetError> {
        let tiled =
            width > 0 && height > 0 && width % TILE_SIZE == 0 && height % TILE_SIZE == 0;
        if !tiled || pixels.len() != width * height {
            return Err(AssetError::Dimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
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

    /// Pixel at `(x, y)`, or `None` outside the atlas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[x + y * self.width])
    }

    /// Number of face tiles in the atlas.
    pub fn tile_count(&self) -> usize {
        (self.width / TILE_SIZE) * (self.height / TILE_SIZE)
    }

    /// Texel `(u, v)` of face tile `tile`.
    ///
    /// Coordinates wrap into the tile and the tile index wraps into the atlas,
    /// so sampling never leaves the pixel buffer.
    pub fn tile_texel(&self, tile: usize, u: usize, v: usize) -> Color {
        let tiles_per_row = self.width / TILE_SIZE;
        let tile = tile % self.tile_count();
        let x = (tile % tiles_per_row) * TILE_SIZE + u % TILE_SIZE;
        let y = (tile / tiles_per_row) * TILE_SIZE + v % TILE_SIZE;
        self.pixels[x + y * self.width]
    }
}

pub fn crate_info() -> &'static str {
    "minetrace-assets v0.1.0"
}
