//! # LSB Codec — 1-bit steganographic embedding
//!
//! Hides a shadow stream in the least-significant-bit plane of a cover
//! grid: one payload bit per cover byte, payload bytes serialized
//! MSB-first. Padding bytes of the cover are fair game — they carry no
//! pixel meaning but they do carry capacity, and both ends of the scheme
//! walk the same padded buffer, so nothing is lost.
//!
//! Two layouts exist, selected by the access structure upstream:
//!
//! - [`CodecMode::FixedDim`] — payload bits start at cover byte 0. Used
//!   when k = 8; the secret's dimensions travel nowhere and recovery
//!   assumes they match the cover's.
//! - [`CodecMode::WithDimHeader`] — a 32-bit prefix of the secret's
//!   width and height (16-bit big-endian each) occupies the first 32
//!   cover bytes, payload from byte 32.
//!
//! Capacity accounting is in bits: a cover holds exactly
//! `row_stride * height` of them.

use thiserror::Error;

use crate::config::DIM_HEADER_BITS;
use crate::raster::PixelGrid;

/// Errors embedding or extracting a shadow stream.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The cover cannot hold the required payload bits.
    #[error("cover capacity exceeded: need {required} bits, have {available}")]
    CapacityExceeded {
        /// Bits the payload (plus any header) requires.
        required: usize,
        /// Bits the cover offers.
        available: usize,
    },
}

/// Which in-band layout a stego image uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecMode {
    /// No metadata prefix; the recovered image inherits the cover's
    /// dimensions.
    FixedDim,
    /// 32-bit dimension header ahead of the payload.
    WithDimHeader,
}

impl CodecMode {
    /// Bits a payload of `payload_len` bytes occupies in this mode.
    pub fn required_bits(self, payload_len: usize) -> usize {
        match self {
            CodecMode::FixedDim => payload_len * 8,
            CodecMode::WithDimHeader => payload_len * 8 + DIM_HEADER_BITS,
        }
    }
}

/// Embedding capacity of a cover in bits: one per byte of the padded
/// pixel buffer.
pub fn capacity_bits(cover: &PixelGrid) -> usize {
    cover.padded_capacity()
}

fn ensure_capacity(cover: &PixelGrid, required: usize) -> Result<(), StegoError> {
    let available = capacity_bits(cover);
    if available < required {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }
    Ok(())
}

/// Overwrite the LSB of `byte` with `bit`.
#[inline]
fn put_bit(byte: &mut u8, bit: u8) {
    *byte = (*byte & 0xFE) | (bit & 0x01);
}

/// Write `value` as a 16-bit big-endian bit string into the LSBs of
/// `cover_bytes[start..start + 16]`.
fn put_u16_bits(cover_bytes: &mut [u8], start: usize, value: u16) {
    for j in 0..16 {
        let bit = ((value >> (15 - j)) & 1) as u8;
        put_bit(&mut cover_bytes[start + j], bit);
    }
}

/// Read a 16-bit big-endian value from the LSBs of
/// `cover_bytes[start..start + 16]`.
fn take_u16_bits(cover_bytes: &[u8], start: usize) -> u16 {
    let mut value = 0u16;
    for j in 0..16 {
        value = (value << 1) | u16::from(cover_bytes[start + j] & 1);
    }
    value
}

/// Write payload bytes MSB-first into successive cover byte LSBs starting
/// at `offset`. Capacity was checked by the caller.
fn put_payload(cover_bytes: &mut [u8], offset: usize, payload: &[u8]) {
    for (bit_index, dst) in cover_bytes[offset..offset + payload.len() * 8]
        .iter_mut()
        .enumerate()
    {
        let byte = payload[bit_index / 8];
        let bit = (byte >> (7 - (bit_index % 8))) & 1;
        put_bit(dst, bit);
    }
}

/// Read `len` payload bytes from successive cover byte LSBs starting at
/// `offset`.
fn take_payload(cover_bytes: &[u8], offset: usize, len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    for (bit_index, src) in cover_bytes[offset..offset + len * 8].iter().enumerate() {
        payload[bit_index / 8] |= (src & 1) << (7 - (bit_index % 8));
    }
    payload
}

/// Embed a payload with no metadata prefix. Cover bytes beyond the
/// payload bits are untouched.
pub fn embed(cover: &mut PixelGrid, payload: &[u8]) -> Result<(), StegoError> {
    ensure_capacity(cover, CodecMode::FixedDim.required_bits(payload.len()))?;
    put_payload(cover.as_bytes_mut(), 0, payload);
    Ok(())
}

/// Embed a payload behind a 32-bit dimension header carrying the
/// secret's width and height.
pub fn embed_with_dims(
    cover: &mut PixelGrid,
    payload: &[u8],
    s_width: u16,
    s_height: u16,
) -> Result<(), StegoError> {
    ensure_capacity(cover, CodecMode::WithDimHeader.required_bits(payload.len()))?;
    let bytes = cover.as_bytes_mut();
    put_u16_bits(bytes, 0, s_width);
    put_u16_bits(bytes, 16, s_height);
    put_payload(bytes, DIM_HEADER_BITS, payload);
    Ok(())
}

/// Extract a payload of `len` bytes embedded without a prefix.
pub fn extract(cover: &PixelGrid, len: usize) -> Result<Vec<u8>, StegoError> {
    ensure_capacity(cover, CodecMode::FixedDim.required_bits(len))?;
    Ok(take_payload(cover.as_bytes(), 0, len))
}

/// Extract a payload of `len` bytes embedded behind a dimension header,
/// returning the payload together with the header's `(width, height)`.
pub fn extract_with_dims(
    cover: &PixelGrid,
    len: usize,
) -> Result<(Vec<u8>, u16, u16), StegoError> {
    ensure_capacity(cover, CodecMode::WithDimHeader.required_bits(len))?;
    let bytes = cover.as_bytes();
    let s_width = take_u16_bits(bytes, 0);
    let s_height = take_u16_bits(bytes, 16);
    let payload = take_payload(bytes, DIM_HEADER_BITS, len);
    Ok((payload, s_width, s_height))
}

/// Read only the 32-bit dimension header. Used by recovery to size the
/// shadow buffers before extracting anything.
pub fn read_dim_header(cover: &PixelGrid) -> Result<(u16, u16), StegoError> {
    ensure_capacity(cover, DIM_HEADER_BITS)?;
    let bytes = cover.as_bytes();
    Ok((take_u16_bits(bytes, 0), take_u16_bits(bytes, 16)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover(width: i32, height: i32) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height, Vec::new()).unwrap();
        // Non-trivial cover content so cleared LSBs are observable.
        for i in 0..grid.padded_capacity() {
            grid.as_bytes_mut()[i] = (i * 7 + 3) as u8;
        }
        grid
    }

    #[test]
    fn required_bits_per_mode() {
        assert_eq!(CodecMode::FixedDim.required_bits(100), 800);
        assert_eq!(CodecMode::WithDimHeader.required_bits(100), 832);
        assert_eq!(CodecMode::WithDimHeader.required_bits(0), 32);
    }

    #[test]
    fn capacity_counts_padding_bytes() {
        // 5 wide pads to stride 8.
        let grid = PixelGrid::new(5, 3, Vec::new()).unwrap();
        assert_eq!(capacity_bits(&grid), 24);
    }

    #[test]
    fn embed_extract_round_trip() {
        let mut c = cover(16, 16);
        let payload: Vec<u8> = (0..=255u8).take(30).collect();
        embed(&mut c, &payload).unwrap();
        assert_eq!(extract(&c, payload.len()).unwrap(), payload);
    }

    #[test]
    fn embed_extract_with_dims_round_trip() {
        let mut c = cover(16, 16);
        let payload = vec![0xA5u8, 0x00, 0xFF, 0x42];
        embed_with_dims(&mut c, &payload, 640, 480).unwrap();

        let (extracted, w, h) = extract_with_dims(&c, payload.len()).unwrap();
        assert_eq!(extracted, payload);
        assert_eq!((w, h), (640, 480));
        assert_eq!(read_dim_header(&c).unwrap(), (640, 480));
    }

    #[test]
    fn payload_bits_are_msb_first() {
        let mut c = cover(16, 16);
        embed(&mut c, &[0b1000_0001]).unwrap();
        let bits: Vec<u8> = c.as_bytes()[..8].iter().map(|b| b & 1).collect();
        assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn dim_header_is_big_endian() {
        let mut c = cover(16, 16);
        embed_with_dims(&mut c, &[], 0x0102, 0x8000).unwrap();
        let bits: Vec<u8> = c.as_bytes()[..32].iter().map(|b| b & 1).collect();
        let mut expected = vec![0u8; 32];
        expected[7] = 1; // 0x0102 bit 8
        expected[14] = 1; // 0x0102 bit 1
        expected[16] = 1; // 0x8000 top bit
        assert_eq!(bits, expected);
    }

    #[test]
    fn bytes_beyond_the_payload_are_untouched() {
        let mut c = cover(16, 16);
        let before = c.as_bytes().to_vec();
        embed(&mut c, &[0xFF, 0x00]).unwrap();
        assert_eq!(&c.as_bytes()[16..], &before[16..]);
    }

    #[test]
    fn upper_bits_of_cover_bytes_are_preserved() {
        let mut c = cover(16, 16);
        let before: Vec<u8> = c.as_bytes().iter().map(|b| b & 0xFE).collect();
        embed(&mut c, &[0x5A, 0xC3]).unwrap();
        let after: Vec<u8> = c.as_bytes().iter().map(|b| b & 0xFE).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn embedding_uses_padding_capacity() {
        // 1×32 grid: 32 logical pixels but stride 4 gives 128 padded
        // bytes, enough for a 16-byte payload that pixels alone could
        // not hold.
        let mut c = PixelGrid::new(1, 32, Vec::new()).unwrap();
        let payload: Vec<u8> = (0..16u8).collect();
        embed(&mut c, &payload).unwrap();
        assert_eq!(extract(&c, payload.len()).unwrap(), payload);
    }

    #[test]
    fn capacity_errors_are_precise() {
        let mut c = PixelGrid::new(4, 2, Vec::new()).unwrap(); // 8 bits
        let err = embed(&mut c, &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                required: 16,
                available: 8
            }
        ));

        let err = embed_with_dims(&mut c, &[], 1, 1).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                required: 32,
                available: 8
            }
        ));

        let err = extract(&c, 2).unwrap_err();
        assert!(matches!(err, StegoError::CapacityExceeded { .. }));
    }

    #[test]
    fn header_only_fits_a_32_bit_cover_exactly() {
        // 8×4 grid: exactly 32 bytes of capacity, room for the header
        // and nothing else.
        let mut c = PixelGrid::new(8, 4, Vec::new()).unwrap();
        embed_with_dims(&mut c, &[], 7, 9).unwrap();
        assert_eq!(read_dim_header(&c).unwrap(), (7, 9));
        let (payload, w, h) = extract_with_dims(&c, 0).unwrap();
        assert!(payload.is_empty());
        assert_eq!((w, h), (7, 9));
    }

    #[test]
    fn extract_is_left_inverse_of_embed_for_all_byte_values() {
        let mut c = cover(33, 9); // stride 36, 324 bytes: 40-byte payload fits
        let payload: Vec<u8> = (0..=255u8).step_by(7).collect();
        embed(&mut c, &payload).unwrap();
        assert_eq!(extract(&c, payload.len()).unwrap(), payload);
    }
}
