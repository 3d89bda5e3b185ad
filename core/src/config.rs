//! # Protocol Constants
//!
//! Every magic number in Umbra lives here. The sharing scheme is a wire
//! format as much as an algorithm: two builds that disagree on any of these
//! values produce stego images the other cannot recover, so changing them
//! is a breaking change to every shadow already hidden in the wild.

// ---------------------------------------------------------------------------
// Finite Field
// ---------------------------------------------------------------------------

/// The prime modulus of the sharing field, GF(257).
///
/// 257 is the smallest prime above 255, so every 8-bit pixel value embeds
/// directly as a field element. The price is the single representable value
/// 256, which does not fit in a shadow byte — see the saturation-avoidance
/// loop in the split path.
pub const PRIME_MODULUS: u16 = 257;

// ---------------------------------------------------------------------------
// Access Structure
// ---------------------------------------------------------------------------

/// Minimum reconstruction threshold. A 1-of-n split is just n copies.
pub const MIN_THRESHOLD: u8 = 2;

/// Maximum reconstruction threshold. One polynomial covers at most 10
/// consecutive pixels per shadow byte.
pub const MAX_THRESHOLD: u8 = 10;

/// Maximum number of shares. Share abscissas are non-zero and must stay
/// below the field modulus; the header label stores them in 16 bits but
/// the scheme never issues an index above 255.
pub const MAX_SHARES: u16 = 255;

/// The threshold at which distribution switches to the fixed-dimension
/// codec path: no in-band dimension header, the recovered image inherits
/// the cover's dimensions.
pub const FIXED_DIM_THRESHOLD: u8 = 8;

// ---------------------------------------------------------------------------
// Scramble Keystream
// ---------------------------------------------------------------------------

/// Multiplier of the 48-bit linear congruential generator.
pub const LCG_MULTIPLIER: u64 = 0x5DEE_CE66D;

/// Increment of the 48-bit linear congruential generator.
pub const LCG_INCREMENT: u64 = 0xB;

/// 48-bit state mask. All LCG arithmetic is carried out mod 2^48.
pub const LCG_STATE_MASK: u64 = (1 << 48) - 1;

/// The keystream byte is the high byte of the 48-bit state.
pub const LCG_OUTPUT_SHIFT: u32 = 40;

// ---------------------------------------------------------------------------
// Steganographic Layout
// ---------------------------------------------------------------------------

/// Bits of in-band metadata written ahead of the payload when the
/// dimension header is in use: 16-bit width plus 16-bit height,
/// big-endian, one bit per cover byte.
pub const DIM_HEADER_BITS: usize = 32;

/// File name prefix for produced stego images: `stego1.bmp`, `stego2.bmp`,
/// and so on, 1-based to match the share abscissas.
pub const STEGO_FILE_PREFIX: &str = "stego";

/// Default output directory for distribution when the caller supplies none.
pub const DEFAULT_OUTPUT_DIR: &str = "./stego_images";

// ---------------------------------------------------------------------------
// Bitmap Container
// ---------------------------------------------------------------------------

/// Size of the BMP file header: signature, file size, the four reserved
/// bytes Umbra uses as a side channel, and the pixel-data offset.
pub const BMP_FILE_HEADER_SIZE: usize = 14;

/// Size of the Windows v3 (BITMAPINFOHEADER) DIB header. Other DIB
/// generations are rejected.
pub const BMP_INFO_HEADER_SIZE: usize = 40;

/// The only pixel depth the scheme operates on.
pub const BMP_BITS_PER_PIXEL: u16 = 8;

/// Palette entries for an 8-bpp bitmap when the header leaves
/// `colors_used` at zero.
pub const BMP_DEFAULT_PALETTE_LEN: usize = 256;
