//! Block compression.
//!
//! Left-to-right parse over one input buffer.  At each position the
//! [`MatchFinder`] proposes the best earlier occurrence; a hit becomes a
//! back-reference (after the pending literals are flushed), a miss leaves the
//! byte in the pending literal run.  Three per-level refinements apply:
//!
//! | Refinement   | Levels | Effect                                              |
//! |--------------|--------|-----------------------------------------------------|
//! | acceleration | 1      | step grows with consecutive misses on literal runs  |
//! | catch-up     | all    | extend each match backwards into pending literals   |
//! | lazy         | 6..=9  | defer a match while the next position matches longer |
//!
//! The output is a single LZ4 block (see [`super::token`]).  Encoding is
//! deterministic and never fails because of input content; the only errors
//! are [`CodecError::InputTooLarge`] and [`CodecError::OutOfMemory`].

use super::match_finder::{Match, MatchFinder};
use super::token::{write_last_literals, write_sequence};
use super::types::{
    CompressParams, LASTLITERALS, LZ4_MAX_INPUT_SIZE, LZ4_MIN_LENGTH, MFLIMIT, SKIP_TRIGGER,
};
use crate::error::CodecError;

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for a given input size.
///
/// Returns 0 if `input_size` exceeds `LZ4_MAX_INPUT_SIZE`.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    if input_size > LZ4_MAX_INPUT_SIZE {
        0
    } else {
        input_size + input_size / 255 + 16
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Extend `m` backwards while the bytes before both ends agree, without
/// crossing `anchor` (the start of the pending literal run).
#[inline]
fn catch_up(src: &[u8], mut m: Match, anchor: usize) -> Match {
    while m.position > anchor && m.source > 0 && src[m.position - 1] == src[m.source - 1] {
        m.position -= 1;
        m.source -= 1;
        m.length += 1;
    }
    m
}

/// Compress `src` as one block, appending to `out`.
///
/// Returns the number of bytes appended.  On error `out` is left at its
/// original length.
pub fn compress_block_into(
    src: &[u8],
    params: &CompressParams,
    out: &mut Vec<u8>,
) -> Result<usize, CodecError> {
    let len = src.len();
    if len > LZ4_MAX_INPUT_SIZE {
        return Err(CodecError::InputTooLarge);
    }
    let start = out.len();
    out.try_reserve(compress_bound(len))?;

    if len < LZ4_MIN_LENGTH {
        write_last_literals(out, src);
        return Ok(out.len() - start);
    }

    let mut finder = match MatchFinder::new(src, params) {
        Ok(f) => f,
        Err(e) => {
            out.truncate(start);
            return Err(e);
        }
    };

    // Matches end at or before `match_end`; none starts after `search_limit`.
    let match_end = len - LASTLITERALS;
    let search_limit = len - MFLIMIT;

    let mut anchor = 0usize;
    let mut pos = 0usize;
    let mut misses = 0u32;

    while pos <= search_limit {
        let Some(mut m) = finder.find(pos, match_end) else {
            let step = if params.accelerate {
                1 + (misses >> SKIP_TRIGGER) as usize
            } else {
                1
            };
            misses = misses.saturating_add(1);
            pos += step;
            continue;
        };

        if params.lazy {
            while m.position < search_limit {
                match finder.find(m.position + 1, match_end) {
                    Some(next) if next.length > m.length => m = next,
                    _ => break,
                }
            }
        }

        let m = catch_up(src, m, anchor);
        write_sequence(out, &src[anchor..m.position], m.distance(), m.length);

        pos = m.end();
        anchor = pos;
        misses = 0;
    }

    write_last_literals(out, &src[anchor..]);
    Ok(out.len() - start)
}

/// Compress `src` into a new block with explicit parameters.
pub fn compress_block(src: &[u8], params: &CompressParams) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    compress_block_into(src, params, &mut out)?;
    Ok(out)
}

/// Compress `src` at `level` (clamped to `CLEVEL_MIN..=CLEVEL_MAX`).
pub fn compress_block_level(src: &[u8], level: i32) -> Result<Vec<u8>, CodecError> {
    compress_block(src, &CompressParams::for_level(level))
}

/// Compress `src` at the default level.
#[inline]
pub fn compress_block_default(src: &[u8]) -> Result<Vec<u8>, CodecError> {
    compress_block(src, &CompressParams::default())
}
