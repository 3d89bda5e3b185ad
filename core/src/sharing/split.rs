//! # Split — polynomial sharing of a pixel grid
//!
//! Partitions the secret's logical pixels into blocks of `k`, treats each
//! block as the coefficient vector of a degree-(k−1) polynomial over
//! GF(257), and evaluates it at x = 1..=n to produce one byte per shadow
//! per block.
//!
//! ## Saturation avoidance
//!
//! An evaluation can land on 256, which has no 8-bit representation. When
//! that happens the block is *perturbed*: the first non-zero coefficient
//! is decremented by one and every evaluation is redone, repeating until
//! all n evaluations fit in a byte. The perturbation is lossy — the
//! affected pixels recover to their decremented values, not the originals.
//! That is the scheme's documented trade for keeping shadows byte-sized.
//!
//! Termination: a decremented coefficient is always in [1, 255], so the
//! decrement never wraps and never reintroduces 256 into the coefficients
//! themselves; the coefficient sum strictly decreases each round, bounding
//! the loop at 255·k rounds per block.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{FIXED_DIM_THRESHOLD, MAX_SHARES, MAX_THRESHOLD, MIN_THRESHOLD};
use crate::raster::PixelGrid;
use crate::sharing::gf257;

/// Errors validating the access structure.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The threshold must be at least 2 (1-of-n is just copies).
    #[error("threshold must be >= {min}, got {got}", min = MIN_THRESHOLD)]
    ThresholdTooLow {
        /// The rejected threshold.
        got: u8,
    },

    /// One polynomial cannot pack more than 10 pixels.
    #[error("threshold must be <= {max}, got {got}", max = MAX_THRESHOLD)]
    ThresholdTooHigh {
        /// The rejected threshold.
        got: u8,
    },

    /// The number of shares must be at least the threshold.
    #[error("total shares ({total}) must be >= threshold ({threshold})")]
    InsufficientShares {
        /// The configured threshold.
        threshold: u8,
        /// The configured total.
        total: u16,
    },

    /// Share abscissas are non-zero bytes, so at most 255 shares exist.
    #[error("cannot create more than {max} shares, got {got}", max = MAX_SHARES)]
    TooManyShares {
        /// The rejected total.
        got: u16,
    },
}

/// The (k, n) access structure: any `k` of the `n` shadows reconstruct
/// the secret, `k − 1` reveal nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Minimum number of shadows required for reconstruction.
    pub k: u8,
    /// Total number of shadows produced.
    pub n: u16,
}

impl ThresholdConfig {
    /// Validate and build an access structure.
    ///
    /// # Constraints
    ///
    /// - `2 <= k <= 10`
    /// - `k <= n <= 255`
    pub fn new(k: u8, n: u16) -> Result<Self, ShareError> {
        if k < MIN_THRESHOLD {
            return Err(ShareError::ThresholdTooLow { got: k });
        }
        if k > MAX_THRESHOLD {
            return Err(ShareError::ThresholdTooHigh { got: k });
        }
        if n < u16::from(k) {
            return Err(ShareError::InsufficientShares {
                threshold: k,
                total: n,
            });
        }
        if n > MAX_SHARES {
            return Err(ShareError::TooManyShares { got: n });
        }
        Ok(Self { k, n })
    }

    /// Whether the stego layout carries the in-band dimension header.
    /// The `k == 8` path omits it and recovery inherits the cover's
    /// dimensions instead.
    pub fn uses_dim_header(&self) -> bool {
        self.k != FIXED_DIM_THRESHOLD
    }

    /// Shadow stream length for a secret of `total_pixels` logical
    /// pixels: one byte per block of `k`, final partial block included.
    pub fn shadow_len(&self, total_pixels: usize) -> usize {
        (total_pixels + self.k as usize - 1) / self.k as usize
    }
}

/// Re-evaluate and perturb `coeffs` until no evaluation at x = 1..=n
/// equals 256. Returns the number of perturbation rounds applied.
fn stabilize_block(coeffs: &mut [u16], n: u16) -> u32 {
    let mut rounds = 0u32;
    'retry: loop {
        for x in 1..=n {
            if gf257::poly_eval(coeffs, x) == 256 {
                // Decrement the first non-zero coefficient; only values in
                // [1, 255] are picked, so this cannot wrap.
                for c in coeffs.iter_mut() {
                    if *c != 0 {
                        *c -= 1;
                        break;
                    }
                }
                rounds += 1;
                continue 'retry;
            }
        }
        return rounds;
    }
}

/// Split a grid into `n` shadow streams of length `ceil(W·H / k)`.
///
/// Pixels are consumed in row-major logical order; the final block is
/// zero-padded when `W·H` is not a multiple of `k`. Blocks that trip the
/// saturation loop are shared in their perturbed form.
pub fn split_grid(grid: &PixelGrid, config: &ThresholdConfig) -> Vec<Vec<u8>> {
    let k = config.k as usize;
    let total_pixels = grid.total_pixels();
    let blocks = config.shadow_len(total_pixels);

    let mut streams: Vec<Vec<u8>> = (0..config.n)
        .map(|_| Vec::with_capacity(blocks))
        .collect();

    let mut perturbed_blocks = 0usize;
    let mut coeffs = vec![0u16; k];

    for block in 0..blocks {
        for (i, c) in coeffs.iter_mut().enumerate() {
            let index = block * k + i;
            *c = if index < total_pixels {
                u16::from(grid.pixel_at_index(index))
            } else {
                0
            };
        }

        if stabilize_block(&mut coeffs, config.n) > 0 {
            perturbed_blocks += 1;
        }

        for (i, stream) in streams.iter_mut().enumerate() {
            let fx = gf257::poly_eval(&coeffs, i as u16 + 1);
            debug_assert!(fx <= 255);
            stream.push(fx as u8);
        }
    }

    tracing::debug!(
        blocks,
        shadows = streams.len(),
        perturbed_blocks,
        "split grid into shadow streams"
    );

    streams
}
