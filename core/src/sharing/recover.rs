//! # Recover — solving the polynomial from k evaluations
//!
//! The inverse of the split: given any k shadow streams and their
//! abscissas, rebuild the original pixels block by block.
//!
//! Each block yields a k × (k+1) augmented Vandermonde system over
//! GF(257) — row i is `[1, x_i, x_i², …, x_i^(k−1) | y_i]` — which is
//! row-reduced with partial pivoting and back-substituted. Solving for the
//! *entire* coefficient vector matters: the scheme packs k consecutive
//! secret pixels as the k coefficients, so interpolating only f(0) would
//! recover one pixel per block and throw the rest away.
//!
//! A system with no usable pivot means duplicate abscissas or corrupt
//! shadow data; the affected block index is reported and the recovery
//! aborts.

use thiserror::Error;

use crate::config::MAX_SHARES;
use crate::raster::{GridError, PaletteColor, PixelGrid};
use crate::sharing::gf257;

/// Errors reconstructing a grid from shadow streams.
#[derive(Debug, Error)]
pub enum RecoverError {
    /// Reconstruction needs at least two shadows.
    #[error("need at least 2 shadows for reconstruction, got {0}")]
    NotEnoughShadows(usize),

    /// Share abscissas are 1-based and never exceed 255 in valid stegos.
    #[error("share abscissa {0} is out of range [1, {max}]", max = MAX_SHARES)]
    InvalidShareIndex(u16),

    /// The same abscissa appeared twice; the system would be singular.
    #[error("duplicate share abscissa: {0}")]
    DuplicateShareIndex(u16),

    /// Shadow streams must all have the same length.
    #[error("shadow stream lengths are inconsistent: expected {expected}, got {got}")]
    InconsistentLengths {
        /// Length of the first stream.
        expected: usize,
        /// Length of the offending stream.
        got: usize,
    },

    /// Gaussian elimination found no pivot: corrupt shadow data.
    #[error("singular system at block {block}: corrupt shadows")]
    SingularSystem {
        /// Index of the unrecoverable block.
        block: usize,
    },

    /// The target dimensions are unusable.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// One shadow as seen by the solver: its abscissa and its byte stream.
#[derive(Debug, Clone)]
pub struct ShadowSource {
    /// The evaluation point x ∈ [1, 255] this shadow was produced at.
    pub x: u16,
    /// One byte per block.
    pub stream: Vec<u8>,
}

/// Solve one block: from evaluations `ys` at abscissas `xs`, return the
/// k polynomial coefficients, or `None` when elimination finds no pivot.
pub fn solve_block(xs: &[u16], ys: &[u8]) -> Option<Vec<u16>> {
    debug_assert_eq!(xs.len(), ys.len());
    let k = xs.len();

    // Augmented matrix: Vandermonde rows with y appended.
    let mut matrix: Vec<Vec<u16>> = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let mut row = Vec::with_capacity(k + 1);
            let mut power = 1u16;
            for _ in 0..k {
                row.push(power);
                power = gf257::mul(power, x);
            }
            row.push(u16::from(y));
            row
        })
        .collect();

    // Forward elimination with partial pivoting.
    for col in 0..k {
        let pivot = (col..k).find(|&row| matrix[row][col] != 0)?;
        matrix.swap(col, pivot);

        let inv = gf257::inv(matrix[col][col]);
        for j in col..=k {
            matrix[col][j] = gf257::mul(matrix[col][j], inv);
        }

        for row in col + 1..k {
            let factor = matrix[row][col];
            if factor == 0 {
                continue;
            }
            for j in col..=k {
                let scaled = gf257::mul(factor, matrix[col][j]);
                matrix[row][j] = gf257::sub(matrix[row][j], scaled);
            }
        }
    }

    // Back-substitution.
    let mut coeffs = vec![0u16; k];
    for i in (0..k).rev() {
        let mut sum = matrix[i][k];
        for j in i + 1..k {
            sum = gf257::sub(sum, gf257::mul(matrix[i][j], coeffs[j]));
        }
        coeffs[i] = sum;
    }
    Some(coeffs)
}

fn validate_sources(shadows: &[ShadowSource]) -> Result<(), RecoverError> {
    if shadows.len() < 2 {
        return Err(RecoverError::NotEnoughShadows(shadows.len()));
    }

    let expected = shadows[0].stream.len();
    for shadow in &shadows[1..] {
        if shadow.stream.len() != expected {
            return Err(RecoverError::InconsistentLengths {
                expected,
                got: shadow.stream.len(),
            });
        }
    }

    let mut seen = [false; MAX_SHARES as usize + 1];
    for shadow in shadows {
        if shadow.x == 0 || shadow.x > MAX_SHARES {
            return Err(RecoverError::InvalidShareIndex(shadow.x));
        }
        if seen[shadow.x as usize] {
            return Err(RecoverError::DuplicateShareIndex(shadow.x));
        }
        seen[shadow.x as usize] = true;
    }

    Ok(())
}

/// Reconstruct a `width × height` grid from `k` shadow streams.
///
/// Every block contributes its full coefficient vector; the zero padding
/// of the final partial block is dropped. The resulting grid carries the
/// supplied palette and zeroed reserved bytes; its padding bytes are
/// zero until the caller unscrambles over the padded buffer.
pub fn recover_grid(
    shadows: &[ShadowSource],
    width: i32,
    height: i32,
    palette: Vec<PaletteColor>,
) -> Result<PixelGrid, RecoverError> {
    validate_sources(shadows)?;

    let k = shadows.len();
    let blocks = shadows[0].stream.len();
    let xs: Vec<u16> = shadows.iter().map(|s| s.x).collect();

    let mut grid = PixelGrid::new(width, height, palette)?;
    let total_pixels = grid.total_pixels();

    let mut ys = vec![0u8; k];
    for block in 0..blocks {
        for (y, shadow) in ys.iter_mut().zip(shadows) {
            *y = shadow.stream[block];
        }

        let coeffs =
            solve_block(&xs, &ys).ok_or(RecoverError::SingularSystem { block })?;

        for (i, &c) in coeffs.iter().enumerate() {
            let index = block * k + i;
            if index >= total_pixels {
                break;
            }
            grid.set_pixel_at_index(index, c as u8);
        }
    }

    tracing::debug!(blocks, shadows = k, width, height, "recovered grid");

    Ok(grid)
}
