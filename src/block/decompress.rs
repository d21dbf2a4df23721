//! Block decompression.
//!
//! Replays the tokens produced by [`TokenReader`] into a growable output
//! vector.  Back-references may only reach bytes produced by this block and
//! are copied forward in chunks so that `distance < length` (an overlapping
//! copy) reproduces the repeating pattern the encoder saw.
//!
//! Error mapping:
//!
//! | Condition                                        | Error             |
//! |--------------------------------------------------|-------------------|
//! | stream empty, or ends inside a token             | `TruncatedStream` |
//! | distance 0 or beyond the bytes produced so far   | `CorruptStream`   |
//! | output would exceed `max_output`                 | `CorruptStream`   |
//! | a length field overflows `usize`                 | `CorruptStream`   |
//! | output growth fails                              | `OutOfMemory`     |
//!
//! On any error the destination is truncated back to its original length.

use super::token::{Token, TokenReader};
use crate::error::CodecError;

/// Largest expansion of one compressed byte (a run of 255-valued length
/// extension bytes each adds 255 output bytes).
const MAX_EXPANSION: usize = 255;

/// Append `length` bytes copied from `distance` bytes behind the end of
/// `dst`.
///
/// The copy proceeds in chunks no larger than the bytes already available
/// past the source start, so overlapping ranges replicate correctly:
/// distance 1 repeats one byte, distance 3 repeats a 3-byte pattern, and so
/// on.  `distance` must be in `1..=dst.len()`.
pub fn copy_back_reference(
    dst: &mut Vec<u8>,
    distance: usize,
    length: usize,
) -> Result<(), CodecError> {
    if distance == 0 || distance > dst.len() {
        return Err(CodecError::CorruptStream);
    }
    dst.try_reserve(length)?;

    let mut src = dst.len() - distance;
    let mut remaining = length;
    while remaining > 0 {
        let chunk = (dst.len() - src).min(remaining);
        dst.extend_from_within(src..src + chunk);
        src += chunk;
        remaining -= chunk;
    }
    Ok(())
}

fn replay(src: &[u8], dst: &mut Vec<u8>, base: usize, max_output: usize) -> Result<(), CodecError> {
    for token in TokenReader::new(src) {
        let produced = dst.len() - base;
        match token? {
            Token::LiteralRun(literals) => {
                if literals.len() > max_output - produced {
                    return Err(CodecError::CorruptStream);
                }
                dst.try_reserve(literals.len())?;
                dst.extend_from_slice(literals);
            }
            Token::BackReference { distance, length } => {
                if distance > produced || length > max_output - produced {
                    return Err(CodecError::CorruptStream);
                }
                copy_back_reference(dst, distance, length)?;
            }
        }
    }
    Ok(())
}

/// Decompress one block, appending to `dst`.
///
/// At most `max_output` bytes are appended.  Returns the number of bytes
/// appended; bytes already in `dst` are not part of this block's history.
pub fn decompress_block_into(
    src: &[u8],
    dst: &mut Vec<u8>,
    max_output: usize,
) -> Result<usize, CodecError> {
    let base = dst.len();
    match replay(src, dst, base, max_output) {
        Ok(()) => Ok(dst.len() - base),
        Err(e) => {
            dst.truncate(base);
            Err(e)
        }
    }
}

/// Decompress one block into a new vector.
///
/// `size_hint` only pre-sizes the output; it is capped by the largest
/// expansion `src` could possibly describe.  The final size comes from the
/// stream.
pub fn decompress_block(src: &[u8], size_hint: usize) -> Result<Vec<u8>, CodecError> {
    let cap = size_hint.min(max_decompressed_len(src.len()));
    let mut out = Vec::new();
    out.try_reserve_exact(cap)?;
    decompress_block_into(src, &mut out, usize::MAX)?;
    Ok(out)
}

/// Upper bound on the output a `compressed_len`-byte block can describe.
#[inline]
pub fn max_decompressed_len(compressed_len: usize) -> usize {
    compressed_len.saturating_mul(MAX_EXPANSION).saturating_add(16)
}
