// Property tests over the public API. These avoid pinning seeds: the
// invariants below hold for every seed, including runs where the
// saturation-avoidance loop perturbs blocks.

use proptest::prelude::*;

use umbra_core::raster::PixelGrid;
use umbra_core::scramble::Keystream;
use umbra_core::sharing::recover::{recover_grid, ShadowSource};
use umbra_core::sharing::split::split_grid;
use umbra_core::sharing::{gf257, ThresholdConfig};
use umbra_core::stego::label::StegoLabel;
use umbra_core::stego::lsb;

fn grid_from(width: i32, height: i32, pixels: &[u8]) -> PixelGrid {
    let mut grid = PixelGrid::new(width, height, Vec::new()).unwrap();
    for (i, &p) in pixels.iter().enumerate() {
        grid.set_pixel_at_index(i, p);
    }
    grid
}

/// The full in-memory pipeline: scramble, split, recover from the first
/// k shadows, unscramble.
fn pipeline_once(secret: &PixelGrid, config: &ThresholdConfig, seed: u16) -> PixelGrid {
    let mut scrambled = secret.clone();
    Keystream::new(seed).xor_into(&mut scrambled);

    let streams = split_grid(&scrambled, config);
    let shadows: Vec<ShadowSource> = streams
        .into_iter()
        .take(config.k as usize)
        .enumerate()
        .map(|(i, stream)| ShadowSource {
            x: i as u16 + 1,
            stream,
        })
        .collect();

    let mut recovered = recover_grid(
        &shadows,
        secret.width(),
        secret.height(),
        secret.clone_palette(),
    )
    .unwrap();
    Keystream::new(seed).xor_into(&mut recovered);
    recovered
}

proptest! {
    /// Scrambling twice with the same seed is the identity, whatever the
    /// grid contents and shape.
    #[test]
    fn scramble_is_an_involution(
        seed in any::<u16>(),
        width in 1i32..12,
        height in 1i32..6,
        fill in any::<u8>(),
    ) {
        let mut grid = PixelGrid::new(width, height, Vec::new()).unwrap();
        for i in 0..grid.total_pixels() {
            grid.set_pixel_at_index(i, fill.wrapping_add(i as u8));
        }
        let original = grid.clone();

        Keystream::new(seed).xor_into(&mut grid);
        Keystream::new(seed).xor_into(&mut grid);
        prop_assert_eq!(grid, original);
    }

    /// The keystream is a pure function of the seed.
    #[test]
    fn keystream_is_deterministic(seed in any::<u16>(), len in 1usize..512) {
        let a = Keystream::new(seed).buffer(len);
        let b = Keystream::new(seed).buffer(len);
        prop_assert_eq!(a, b);
    }

    /// Extract inverts embed for any payload that fits, in both layouts.
    #[test]
    fn lsb_extract_inverts_embed(
        payload in proptest::collection::vec(any::<u8>(), 0..64),
        noise in any::<u8>(),
        with_header in any::<bool>(),
    ) {
        // 24×24 cover: 576 bits, enough for 64 bytes + header.
        let mut cover = PixelGrid::new(24, 24, Vec::new()).unwrap();
        for i in 0..cover.padded_capacity() {
            cover.as_bytes_mut()[i] = noise.wrapping_mul(i as u8 | 1);
        }

        if with_header {
            lsb::embed_with_dims(&mut cover, &payload, 1024, 768).unwrap();
            let (extracted, w, h) = lsb::extract_with_dims(&cover, payload.len()).unwrap();
            prop_assert_eq!(extracted, payload);
            prop_assert_eq!((w, h), (1024, 768));
        } else {
            lsb::embed(&mut cover, &payload).unwrap();
            prop_assert_eq!(lsb::extract(&cover, payload.len()).unwrap(), payload);
        }
    }

    /// Every field element has a working inverse.
    #[test]
    fn gf257_inverse_law(a in 1u16..257) {
        prop_assert_eq!(gf257::mul(a, gf257::inv(a)), 1);
    }

    /// Solving evaluations of a random polynomial returns its
    /// coefficients, for any threshold and any distinct abscissas.
    #[test]
    fn solver_inverts_evaluation(
        coeffs in proptest::collection::vec(0u16..256, 2..=10),
        offset in 1u16..100,
    ) {
        let xs: Vec<u16> = (0..coeffs.len() as u16).map(|i| offset + i).collect();
        let ys: Vec<u8> = xs
            .iter()
            .map(|&x| (gf257::poly_eval(&coeffs, x) % 256) as u8)
            .collect();
        // Only exercise blocks whose evaluations are all bytes; the
        // split path guarantees that for real shadow data.
        prop_assume!(xs.iter().all(|&x| gf257::poly_eval(&coeffs, x) != 256));

        let solved = umbra_core::sharing::recover::solve_block(&xs, &ys).unwrap();
        prop_assert_eq!(&solved, &coeffs);

        // The interpolate-and-deflate solver must agree with elimination.
        let interpolated = umbra_core::sharing::lagrange::interpolate_block(&xs, &ys);
        prop_assert_eq!(interpolated, coeffs);
    }

    /// All k-subsets of the n shadows agree on the recovered grid, even
    /// when the split perturbed blocks on the way out.
    #[test]
    fn all_share_subsets_agree(
        pixels in proptest::collection::vec(any::<u8>(), 1..48),
        k in 2u8..=3,
        seed in any::<u16>(),
    ) {
        let width = pixels.len() as i32;
        let secret = grid_from(width, 1, &pixels);
        let config = ThresholdConfig::new(k, 5).unwrap();

        let mut scrambled = secret.clone();
        Keystream::new(seed).xor_into(&mut scrambled);
        let streams = split_grid(&scrambled, &config);

        let mut reference: Option<Vec<u8>> = None;
        let n = streams.len();
        for first in 0..n {
            for second in (first + 1)..n {
                let mut picks = vec![(first, streams[first].clone()), (second, streams[second].clone())];
                if k == 3 {
                    let third = (second + 1) % n;
                    prop_assume!(third != first);
                    picks.push((third, streams[third].clone()));
                }
                let shadows: Vec<ShadowSource> = picks
                    .into_iter()
                    .map(|(i, stream)| ShadowSource { x: i as u16 + 1, stream })
                    .collect();

                let recovered = recover_grid(&shadows, width, 1, Vec::new()).unwrap();
                let bytes = recovered.as_bytes().to_vec();
                match &reference {
                    None => reference = Some(bytes),
                    Some(expected) => prop_assert_eq!(&bytes, expected),
                }
            }
        }
    }

    /// One pass through the pipeline is a projection: a recovered image
    /// survives a second pass bit-identically. Blocks the first pass
    /// perturbed are already stable, so the second pass changes nothing.
    #[test]
    fn pipeline_is_idempotent(
        pixels in proptest::collection::vec(any::<u8>(), 1..64),
        k in 2u8..=4,
        seed in any::<u16>(),
    ) {
        let width = pixels.len() as i32;
        let secret = grid_from(width, 1, &pixels);
        let config = ThresholdConfig::new(k, u16::from(k) + 1).unwrap();

        let once = pipeline_once(&secret, &config, seed);
        let twice = pipeline_once(&once, &config, seed);
        prop_assert_eq!(twice.as_bytes(), once.as_bytes());
    }

    /// The reserved-byte label survives packing for every seed and index.
    #[test]
    fn label_round_trips(seed in any::<u16>(), index in any::<u16>()) {
        let label = StegoLabel::new(seed, index);
        prop_assert_eq!(StegoLabel::from_reserved(label.to_reserved()), label);
    }
}
