//! # Scramble Keystream
//!
//! A 48-bit linear congruential generator keyed by a 16-bit seed, used to
//! diffuse the secret image before sharing. The constants are the classic
//! `0x5DEECE66D` / `0xB` pair; each step emits the high byte of the state.
//!
//! This is an obfuscation layer, not a cipher: the seed rides along in the
//! stego header in the clear, and recovery replays the identical stream.
//! What matters is exact cross-platform reproducibility, which is why the
//! update rule is pinned down to the bit and covered by literal vectors in
//! the tests.
//!
//! The generator is an owned, per-operation value. The distributor and the
//! recoverer each build their own; there is no process-wide seed state.

use crate::config::{LCG_INCREMENT, LCG_MULTIPLIER, LCG_OUTPUT_SHIFT, LCG_STATE_MASK};
use crate::raster::PixelGrid;

/// Deterministic byte stream from a 16-bit seed.
#[derive(Debug, Clone)]
pub struct Keystream {
    state: u64,
}

impl Keystream {
    /// Seed the generator. `state = (seed ^ 0x5DEECE66D) mod 2^48`.
    pub fn new(seed: u16) -> Self {
        Self {
            state: (u64::from(seed) ^ LCG_MULTIPLIER) & LCG_STATE_MASK,
        }
    }

    /// Advance the state and return the next keystream byte, the high
    /// byte of the 48-bit state.
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_STATE_MASK;
        (self.state >> LCG_OUTPUT_SHIFT) as u8
    }

    /// Produce `len` consecutive keystream bytes.
    pub fn buffer(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.next_byte()).collect()
    }

    /// XOR the keystream over the grid's entire padded pixel buffer,
    /// in place. Padding bytes are scrambled along with the pixels; the
    /// unscramble on the recovery side walks the same padded buffer, so
    /// the two applications cancel exactly.
    pub fn xor_into(&mut self, grid: &mut PixelGrid) {
        let table = self.buffer(grid.padded_capacity());
        for (byte, key) in grid.as_bytes_mut().iter_mut().zip(table) {
            *byte ^= key;
        }
    }
}
