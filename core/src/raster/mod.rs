//! # Raster Module
//!
//! The in-memory image model and its on-disk container. Everything above
//! this module manipulates a [`PixelGrid`]: an 8-bpp, bottom-up, padded
//! raster with a BGRA palette and the four reserved header bytes that
//! Umbra repurposes as a metadata side channel.
//!
//! The split between `grid` and `bmp` mirrors the split between the
//! algorithm's view of an image (a padded byte plane with logical pixel
//! addressing) and the Windows v3 bitmap wire format that carries it.

pub mod bmp;
pub mod grid;

pub use bmp::{load_bmp, save_bmp, BmpError};
pub use grid::{grayscale_palette, GridError, PaletteColor, PixelGrid};
