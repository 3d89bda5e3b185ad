//! # Stego Label — the reserved-byte side channel
//!
//! Every stego image carries the scramble seed and its share abscissa in
//! the four reserved bytes of the BMP file header: `(seed_lo, seed_hi,
//! x_lo, x_hi)`. Ordinary bitmap software ignores those bytes, so the
//! label survives any viewer that does not rewrite the file.
//!
//! The abscissa field is 16 bits wide but the scheme never issues an
//! index above 255; the width is a container convenience, not headroom.

use serde::{Deserialize, Serialize};

/// The metadata stamped into a stego image's reserved header bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StegoLabel {
    /// Seed of the scramble keystream, shared by all n stegos of one run.
    pub seed: u16,
    /// This stego's share abscissa, 1-based.
    pub share_index: u16,
}

impl StegoLabel {
    pub fn new(seed: u16, share_index: u16) -> Self {
        Self { seed, share_index }
    }

    /// Pack as `(seed_lo, seed_hi, x_lo, x_hi)`.
    pub fn to_reserved(self) -> [u8; 4] {
        let [seed_lo, seed_hi] = self.seed.to_le_bytes();
        let [x_lo, x_hi] = self.share_index.to_le_bytes();
        [seed_lo, seed_hi, x_lo, x_hi]
    }

    /// Unpack from the four reserved header bytes.
    pub fn from_reserved(reserved: [u8; 4]) -> Self {
        Self {
            seed: u16::from_le_bytes([reserved[0], reserved[1]]),
            share_index: u16::from_le_bytes([reserved[2], reserved[3]]),
        }
    }
}
