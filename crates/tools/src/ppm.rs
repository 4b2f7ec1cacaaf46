use minetrace_common::Color;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Encode a frame as binary PPM (P6). Alpha is dropped.
pub fn encode_ppm<W: Write>(
    mut writer: W,
    width: usize,
    height: usize,
    pixels: &[Color],
) -> io::Result<()> {
    let expected = width.checked_mul(height).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "frame dimensions overflow")
    })?;
    if pixels.len() != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "frame {width}x{height} needs {expected} pixels, got {}",
                pixels.len()
            ),
        ));
    }

    write!(writer, "P6\n{width} {height}\n255\n")?;
    let mut bytes = Vec::with_capacity(expected * 3);
    for c in pixels {
        bytes.extend_from_slice(&[c.r(), c.g(), c.b()]);
    }
    writer.write_all(&bytes)?;
    writer.flush()
}

/// Write a frame to `path` as binary PPM.
pub fn write_ppm(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
    pixels: &[Color],
) -> io::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    encode_ppm(BufWriter::new(file), width, height, pixels)?;
    tracing::info!(path = %path.display(), width, height, "frame written");
    Ok(())
}
