//! Size-prefixed framing.
//!
//! A frame is the uncompressed length as a little-endian `u32` followed by
//! one block:
//!
//! ```text
//! +----------------+------------------------------+
//! | len (u32 LE)   | block (token stream)         |
//! +----------------+------------------------------+
//! ```
//!
//! The prefix lets the decoder size its output exactly once and detect a
//! stream that stops short or runs long.  The layout is byte-compatible with
//! lz4_flex's `compress_prepend_size` / `decompress_size_prepended`.

use crate::block::compress::{compress_block_into, compress_bound};
use crate::block::decompress::{decompress_block_into, max_decompressed_len};
use crate::block::types::{CompressParams, LZ4_MAX_INPUT_SIZE};
use crate::error::CodecError;

/// Length of the size prefix in bytes.
pub const SIZE_PREFIX_LEN: usize = 4;

/// Uncompressed length recorded in the prefix, or `None` if `src` is too
/// short to hold one.
#[inline]
pub fn declared_size(src: &[u8]) -> Option<usize> {
    let prefix: [u8; SIZE_PREFIX_LEN] = src.get(..SIZE_PREFIX_LEN)?.try_into().ok()?;
    Some(u32::from_le_bytes(prefix) as usize)
}

/// Worst-case framed size for `input_size` bytes (0 when too large).
#[inline]
pub fn frame_bound(input_size: usize) -> usize {
    match compress_bound(input_size) {
        0 => 0,
        n => n + SIZE_PREFIX_LEN,
    }
}

/// Compress `src` with explicit parameters, prefixed by its length.
pub fn compress_prepend_size_with(
    src: &[u8],
    params: &CompressParams,
) -> Result<Vec<u8>, CodecError> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        return Err(CodecError::InputTooLarge);
    }
    let mut out = Vec::new();
    out.try_reserve_exact(frame_bound(src.len()))?;
    out.extend_from_slice(&(src.len() as u32).to_le_bytes());
    compress_block_into(src, params, &mut out)?;
    Ok(out)
}

/// Compress `src` at `level`, prefixed by its length.
pub fn compress_prepend_size(src: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
    compress_prepend_size_with(src, &CompressParams::for_level(level))
}

/// Decompress a frame produced by [`compress_prepend_size`].
///
/// | Condition                          | Error             |
/// |------------------------------------|-------------------|
/// | fewer than 4 bytes                 | `TruncatedStream` |
/// | block yields fewer bytes than declared | `TruncatedStream` |
/// | block yields more bytes than declared  | `CorruptStream`   |
pub fn decompress_size_prepended(src: &[u8]) -> Result<Vec<u8>, CodecError> {
    let declared = declared_size(src).ok_or(CodecError::TruncatedStream)?;
    let block = &src[SIZE_PREFIX_LEN..];

    // A hostile prefix must not drive a huge up-front allocation.
    let cap = declared.min(max_decompressed_len(block.len()));
    let mut out = Vec::new();
    out.try_reserve_exact(cap)?;

    decompress_block_into(block, &mut out, declared)?;
    if out.len() != declared {
        return Err(CodecError::TruncatedStream);
    }
    Ok(out)
}
