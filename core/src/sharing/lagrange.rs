//! # Lagrange deflation — the solver's independent twin
//!
//! A second route to the full coefficient vector, with different failure
//! modes than Gaussian elimination: interpolate the constant term
//! directly with Lagrange basis polynomials at x = 0, peel it off, and
//! deflate the samples by dividing through by x. Repeating k times walks
//! the coefficients out one by one:
//!
//! ```text
//! c_0 = Σ_i  y_i · Π_{j≠i} (−x_j)/(x_i − x_j)
//! y_i ← (y_i − c_0) / x_i          then recurse on the degree-(k−2) rest
//! ```
//!
//! Same answer as the elimination solver on every well-formed input —
//! the property tests hold the two to that. Elimination stays the
//! production path because its pivoting reports *which* block is corrupt
//! instead of quietly extrapolating; this one exists as a cross-check
//! and as the clearer statement of the underlying algebra.
//!
//! Requires every abscissa to be non-zero (the deflation divides by
//! x_i), which the share layout guarantees: abscissas are 1-based.

use crate::sharing::gf257;

/// Recover all k coefficients from evaluations `ys` at distinct non-zero
/// abscissas `xs` by repeated interpolation at zero and deflation.
pub fn interpolate_block(xs: &[u16], ys: &[u8]) -> Vec<u16> {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(xs.iter().all(|&x| x != 0));
    let k = xs.len();

    let mut work: Vec<u16> = ys.iter().map(|&y| u16::from(y)).collect();
    let mut coeffs = Vec::with_capacity(k);

    // Lagrange basis values at x = 0 do not change under deflation, so
    // compute them once.
    let basis_at_zero: Vec<u16> = (0..k)
        .map(|i| {
            let mut numerator = 1u16;
            let mut denominator = 1u16;
            for j in 0..k {
                if j == i {
                    continue;
                }
                numerator = gf257::mul(numerator, gf257::sub(0, xs[j]));
                denominator = gf257::mul(denominator, gf257::sub(xs[i], xs[j]));
            }
            gf257::mul(numerator, gf257::inv(denominator))
        })
        .collect();

    for _ in 0..k {
        let constant = work
            .iter()
            .zip(&basis_at_zero)
            .fold(0u16, |acc, (&y, &l)| gf257::add(acc, gf257::mul(y, l)));
        coeffs.push(constant);

        for (y, &x) in work.iter_mut().zip(xs) {
            *y = gf257::mul(gf257::sub(*y, constant), gf257::inv(x));
        }
    }

    coeffs
}
