//! Block constants, byte-reading helpers, match-length counting and the
//! compression-level table.
//!
//! Everything here operates on slices with explicit indices; the helpers
//! are small enough that the bounds checks fold into the callers' loops.
//!   - Format constants (`MINMATCH`, `LASTLITERALS`, `MFLIMIT`, …)
//!   - Little-endian readers (`read32`, `read_le16`, `read64`)
//!   - `hash4` (multiplicative hash of a 4-byte prefix)
//!   - `nb_common_bytes` and `count` (match-length helpers)
//!   - `CompressParams` and `LEVEL_TABLE`

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in a block.  Shorter repeats cost more as a
/// back-reference than as literals.
pub const MINMATCH: usize = 4;

/// Last N bytes of the input are always emitted as literals.
pub const LASTLITERALS: usize = 5;

/// No match may start within the last `MFLIMIT` bytes of the input.
pub const MFLIMIT: usize = 12;

/// Minimum input length that may produce any match at all.
pub const LZ4_MIN_LENGTH: usize = MFLIMIT + 1;

pub const MB: usize = 1 << 20;

/// Maximum back-reference distance (the window).
pub const LZ4_DISTANCE_MAX: usize = 65_535;

/// Maximum allowed input size (2 113 929 216 bytes).
pub const LZ4_MAX_INPUT_SIZE: usize = 0x7E00_0000;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: u32 = (1u32 << ML_BITS) - 1;
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: u32 = (1u32 << RUN_BITS) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// Hash-table sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest hash log (4096 heads, 16 KiB of `u32`).  Fewer bits let
/// ASCII runs such as `abcd`/`bcde` land in the same slot.
pub const HASH_LOG_MIN: u32 = 12;
/// Largest hash log (65 536 heads, 256 KiB of `u32`).
pub const HASH_LOG_MAX: u32 = 16;

/// Chain table length: one delta per position of the window.
pub const CHAIN_SIZE_MAX: usize = LZ4_DISTANCE_MAX + 1;

/// After `1 << SKIP_TRIGGER` consecutive misses the accelerated search
/// starts stepping over positions.
pub const SKIP_TRIGGER: u32 = 6;

/// Hash log sized to the input: one head per input position, clamped to
/// `HASH_LOG_MIN..=HASH_LOG_MAX`.
#[inline]
pub fn hash_log_for(input_len: usize) -> u32 {
    let bits = usize::BITS - input_len.max(1).leading_zeros();
    bits.clamp(HASH_LOG_MIN, HASH_LOG_MAX)
}

/// Chain table length for an input: the window, or the next power of two
/// above the input when the input is smaller than the window.
#[inline]
pub fn chain_size_for(input_len: usize) -> usize {
    input_len.max(1).next_power_of_two().min(CHAIN_SIZE_MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte readers
// ─────────────────────────────────────────────────────────────────────────────

/// Read a little-endian `u16` at `pos`.
///
/// Panics if fewer than 2 bytes remain; callers check lengths first.
#[inline(always)]
pub fn read_le16(src: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([src[pos], src[pos + 1]])
}

/// Read a little-endian `u32` at `pos`.
#[inline(always)]
pub fn read32(src: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([src[pos], src[pos + 1], src[pos + 2], src[pos + 3]])
}

/// Read a little-endian `u64` at `pos`.
#[inline(always)]
pub fn read64(src: &[u8], pos: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&src[pos..pos + 8]);
    u64::from_le_bytes(word)
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing and match counting
// ─────────────────────────────────────────────────────────────────────────────

/// Multiplicative hash of a 4-byte sequence, keeping `hash_log` bits.
#[inline(always)]
pub fn hash4(sequence: u32, hash_log: u32) -> usize {
    (sequence.wrapping_mul(2_654_435_761) >> (32 - hash_log)) as usize
}

/// Number of equal low-order bytes given the XOR of two little-endian words.
///
/// `diff` must be non-zero.
#[inline(always)]
pub fn nb_common_bytes(diff: u64) -> usize {
    (diff.trailing_zeros() / 8) as usize
}

/// Count how many bytes match between `src[earlier..]` and `src[later..]`,
/// never reading at or past `limit` on the `later` side.
///
/// `earlier < later <= limit <= src.len()`.  The two ranges may overlap;
/// that is exactly the `distance < length` case the decoder replays forward.
#[inline]
pub fn count(src: &[u8], earlier: usize, later: usize, limit: usize) -> usize {
    debug_assert!(earlier < later && later <= limit && limit <= src.len());
    let start = later;
    let (mut a, mut b) = (earlier, later);

    while b + 8 <= limit {
        let diff = read64(src, a) ^ read64(src, b);
        if diff != 0 {
            return b + nb_common_bytes(diff) - start;
        }
        a += 8;
        b += 8;
    }
    while b < limit && src[a] == src[b] {
        a += 1;
        b += 1;
    }
    b - start
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression levels
// ─────────────────────────────────────────────────────────────────────────────

/// Per-level match-finder and parser parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressParams {
    /// Maximum number of chain candidates verified per position.
    pub nb_searches: u32,
    /// Defer a match by one byte when the next position matches longer.
    pub lazy: bool,
    /// Step over positions faster during long literal runs.
    pub accelerate: bool,
}

/// Level → parameter table.  Index is the compression level (0 unused).
pub static LEVEL_TABLE: [CompressParams; 10] = [
    CompressParams { nb_searches:   1, lazy: false, accelerate: true  }, /* 0, unused */
    CompressParams { nb_searches:   1, lazy: false, accelerate: true  }, /* 1 */
    CompressParams { nb_searches:   2, lazy: false, accelerate: false }, /* 2 */
    CompressParams { nb_searches:   4, lazy: false, accelerate: false }, /* 3 */
    CompressParams { nb_searches:   8, lazy: false, accelerate: false }, /* 4 */
    CompressParams { nb_searches:  16, lazy: false, accelerate: false }, /* 5 */
    CompressParams { nb_searches:  32, lazy: true,  accelerate: false }, /* 6 */
    CompressParams { nb_searches:  64, lazy: true,  accelerate: false }, /* 7 */
    CompressParams { nb_searches: 128, lazy: true,  accelerate: false }, /* 8 */
    CompressParams { nb_searches: 256, lazy: true,  accelerate: false }, /* 9 */
];

impl CompressParams {
    /// Parameters for `level`, clamped to the supported range.
    pub fn for_level(level: i32) -> Self {
        LEVEL_TABLE[crate::config::clamp_level(level) as usize]
    }
}

impl Default for CompressParams {
    fn default() -> Self {
        Self::for_level(crate::config::CLEVEL_DEFAULT)
    }
}
