//! # Stego Module
//!
//! Concealment of shadow streams in cover bitmaps, split across two
//! channels:
//!
//! - **lsb** — the payload channel: one shadow bit per cover byte in the
//!   least-significant-bit plane, optionally prefixed by a 32-bit
//!   dimension header.
//! - **label** — the side channel: the scramble seed and share abscissa
//!   packed into the four reserved bytes of the BMP file header, outside
//!   the pixel data entirely.

pub mod label;
pub mod lsb;

pub use label::StegoLabel;
pub use lsb::{CodecMode, StegoError};
