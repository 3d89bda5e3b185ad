//! # GF(257) Arithmetic
//!
//! The prime field of integers modulo 257. Elements are `u16` in
//! `[0, 256]`; 257 is the smallest prime that holds a full byte, which is
//! why the sharing polynomial lives here rather than in GF(256) — pixel
//! values map to field elements with no encoding step at all.
//!
//! The value 256 is a legitimate field element and shows up transiently in
//! polynomial evaluations; the split path is responsible for never letting
//! it escape into a shadow byte.

use crate::config::PRIME_MODULUS;

/// Add two field elements.
#[inline]
pub fn add(a: u16, b: u16) -> u16 {
    (a + b) % PRIME_MODULUS
}

/// Subtract `b` from `a` in the field.
#[inline]
pub fn sub(a: u16, b: u16) -> u16 {
    (a + PRIME_MODULUS - b) % PRIME_MODULUS
}

/// Multiply two field elements. Widened to u32 internally; 256 * 256
/// does not fit in sixteen bits.
#[inline]
pub fn mul(a: u16, b: u16) -> u16 {
    ((u32::from(a) * u32::from(b)) % u32::from(PRIME_MODULUS)) as u16
}

/// Multiplicative inverse via the extended Euclidean algorithm.
///
/// `inv(0)` has no meaning; the solver never requests it because a zero
/// pivot is rejected before normalization.
pub fn inv(a: u16) -> u16 {
    debug_assert!(a != 0 && a < PRIME_MODULUS, "inverse of 0 requested");
    let p = i32::from(PRIME_MODULUS);
    let (mut t, mut new_t) = (0i32, 1i32);
    let (mut r, mut new_r) = (p, i32::from(a));

    while new_r != 0 {
        let quotient = r / new_r;
        (t, new_t) = (new_t, t - quotient * new_t);
        (r, new_r) = (new_r, r - quotient * new_r);
    }

    if t < 0 {
        t += p;
    }
    t as u16
}

/// Evaluate `Σ coeffs[i] · x^i` in the field, with a running power.
pub fn poly_eval(coeffs: &[u16], x: u16) -> u16 {
    let mut result = 0u16;
    let mut power = 1u16;
    for &c in coeffs {
        result = add(result, mul(c, power));
        power = mul(power, x);
    }
    result
}
