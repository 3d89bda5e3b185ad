//! # BMP Codec — Windows v3 container
//!
//! Loads and saves the one bitmap flavor the scheme operates on: 8 bpp,
//! uncompressed, bottom-up, BITMAPINFOHEADER, with a BGRA palette. All
//! multi-byte fields are little-endian and packed by hand — no struct
//! transmutes, no alignment games.
//!
//! The four reserved bytes of the *file* header survive a load/save round
//! trip verbatim. That field is meaningless to every ordinary BMP reader,
//! which is exactly why the distributor can park the scramble seed and the
//! share abscissa there without disturbing the image.
//!
//! Anything the scheme cannot process is rejected up front with a precise
//! error: other DIB header generations, other depths, any compression,
//! top-down row order.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::{
    BMP_BITS_PER_PIXEL, BMP_DEFAULT_PALETTE_LEN, BMP_FILE_HEADER_SIZE, BMP_INFO_HEADER_SIZE,
};
use crate::raster::grid::{aligned_stride, GridError, PaletteColor, PixelGrid};

/// Errors loading or saving a bitmap.
#[derive(Debug, Error)]
pub enum BmpError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the `BM` signature.
    #[error("not a BMP file: bad signature")]
    BadSignature,

    /// The DIB header is not the 40-byte Windows v3 header.
    #[error("unsupported DIB header size: {0}")]
    UnsupportedHeader(u32),

    /// Only 8 bits per pixel are supported.
    #[error("unsupported bits per pixel: {0}")]
    UnsupportedDepth(u16),

    /// Only uncompressed pixel data is supported.
    #[error("unsupported compression type: {0}")]
    Compressed(u32),

    /// Negative height means top-down row order, which is rejected.
    #[error("top-down bitmaps are not supported")]
    TopDown,

    /// Non-positive width or zero height.
    #[error("invalid image dimensions: {width} x {height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// The file ended before a declared section.
    #[error("file truncated reading {section}")]
    Truncated { section: &'static str },
}

impl From<GridError> for BmpError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidDimensions { width, height } => {
                BmpError::InvalidDimensions { width, height }
            }
            GridError::BufferSizeMismatch { .. } => BmpError::Truncated {
                section: "pixel data",
            },
        }
    }
}

// Little-endian field readers over the raw file bytes. Each checks its own
// bounds so a short file surfaces as Truncated, never as a panic.

fn read_u16(bytes: &[u8], offset: usize, section: &'static str) -> Result<u16, BmpError> {
    let end = offset + 2;
    if bytes.len() < end {
        return Err(BmpError::Truncated { section });
    }
    Ok(u16::from_le_bytes([bytes[offset], bytes[offset + 1]]))
}

fn read_u32(bytes: &[u8], offset: usize, section: &'static str) -> Result<u32, BmpError> {
    let end = offset + 4;
    if bytes.len() < end {
        return Err(BmpError::Truncated { section });
    }
    Ok(u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]))
}

fn read_i32(bytes: &[u8], offset: usize, section: &'static str) -> Result<i32, BmpError> {
    Ok(read_u32(bytes, offset, section)? as i32)
}

/// Load an 8-bpp Windows v3 BMP into a [`PixelGrid`].
///
/// The reserved file-header bytes, the palette (256 entries when the
/// header declares zero), and the padded pixel buffer are all carried
/// into the grid unchanged.
pub fn load_bmp<P: AsRef<Path>>(path: P) -> Result<PixelGrid, BmpError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    if bytes.len() < 2 || bytes[0] != b'B' || bytes[1] != b'M' {
        return Err(BmpError::BadSignature);
    }

    let bof = read_u32(&bytes, 10, "file header")?;
    let reserved = [bytes[6], bytes[7], bytes[8], bytes[9]];

    let dib_size = read_u32(&bytes, 14, "info header")?;
    if dib_size as usize != BMP_INFO_HEADER_SIZE {
        return Err(BmpError::UnsupportedHeader(dib_size));
    }

    let width = read_i32(&bytes, 18, "info header")?;
    let height = read_i32(&bytes, 22, "info header")?;
    let bpp = read_u16(&bytes, 28, "info header")?;
    let compression = read_u32(&bytes, 30, "info header")?;
    let colors_used = read_u32(&bytes, 46, "info header")?;

    if bpp != BMP_BITS_PER_PIXEL {
        return Err(BmpError::UnsupportedDepth(bpp));
    }
    if compression != 0 {
        return Err(BmpError::Compressed(compression));
    }
    if height < 0 {
        return Err(BmpError::TopDown);
    }
    if width <= 0 || height == 0 {
        return Err(BmpError::InvalidDimensions { width, height });
    }

    let palette_len = if colors_used == 0 {
        BMP_DEFAULT_PALETTE_LEN
    } else {
        colors_used as usize
    };
    let palette_offset = BMP_FILE_HEADER_SIZE + dib_size as usize;
    let palette_end = palette_offset + palette_len * 4;
    if bytes.len() < palette_end {
        return Err(BmpError::Truncated { section: "palette" });
    }
    let palette: Vec<PaletteColor> = bytes[palette_offset..palette_end]
        .chunks_exact(4)
        .map(|c| PaletteColor {
            blue: c[0],
            green: c[1],
            red: c[2],
            alpha: c[3],
        })
        .collect();

    let image_size = aligned_stride(width) * height as usize;
    let pixel_offset = bof as usize;
    let pixel_end = pixel_offset + image_size;
    if bytes.len() < pixel_end {
        return Err(BmpError::Truncated {
            section: "pixel data",
        });
    }
    let pixels = bytes[pixel_offset..pixel_end].to_vec();

    tracing::debug!(
        path = %path.display(),
        width,
        height,
        colors = palette_len,
        "loaded bitmap"
    );

    Ok(PixelGrid::from_parts(
        width, height, palette, pixels, reserved,
    )?)
}

/// Save a [`PixelGrid`] as an 8-bpp Windows v3 BMP.
///
/// The grid's reserved bytes are written into the file header; the
/// palette is emitted exactly as stored, and `colors_used` reflects its
/// length.
pub fn save_bmp<P: AsRef<Path>>(path: P, grid: &PixelGrid) -> Result<(), BmpError> {
    let path = path.as_ref();
    let palette_bytes = grid.palette().len() * 4;
    let bof = (BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE + palette_bytes) as u32;
    let image_size = grid.padded_capacity();
    let file_size = bof + image_size as u32;

    let mut out = Vec::with_capacity(file_size as usize);

    // File header.
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&grid.reserved());
    out.extend_from_slice(&bof.to_le_bytes());

    // Info header.
    out.extend_from_slice(&(BMP_INFO_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&grid.width().to_le_bytes());
    out.extend_from_slice(&grid.height().to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&BMP_BITS_PER_PIXEL.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression: none
    out.extend_from_slice(&0u32.to_le_bytes()); // image_size: 0 for uncompressed
    out.extend_from_slice(&0i32.to_le_bytes()); // h_resolution
    out.extend_from_slice(&0i32.to_le_bytes()); // v_resolution
    out.extend_from_slice(&(grid.palette().len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // important_colors: all

    for color in grid.palette() {
        out.extend_from_slice(&[color.blue, color.green, color.red, color.alpha]);
    }

    out.extend_from_slice(grid.as_bytes());

    fs::write(path, &out)?;

    tracing::debug!(
        path = %path.display(),
        bytes = out.len(),
        "saved bitmap"
    );

    Ok(())
}
