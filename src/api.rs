//! Engine entry points behind the C ABI.
//!
//! These are the safe Rust counterparts of `lz4_compress`,
//! `lz4_compress_level` and `lz4_decompress`: whole-buffer, size-prefixed
//! frames in, engine-owned buffers out.  Empty input and empty results are
//! both [`CodecError::EmptyInput`]; a zero-length buffer is never handed out.

use crate::buffer::EngineBuffer;
use crate::config::CLEVEL_DEFAULT;
use crate::error::CodecError;
use crate::frame::{compress_prepend_size, decompress_size_prepended};

/// Compress `input` at the default level into a size-prefixed frame.
pub fn compress(input: &[u8]) -> Result<EngineBuffer, CodecError> {
    compress_level(input, CLEVEL_DEFAULT)
}

/// Compress `input` at `level` (clamped) into a size-prefixed frame.
pub fn compress_level(input: &[u8], level: i32) -> Result<EngineBuffer, CodecError> {
    if input.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    let framed = compress_prepend_size(input, level)?;
    EngineBuffer::copy_from_slice(&framed)
}

/// Decompress a size-prefixed frame.
pub fn decompress(input: &[u8]) -> Result<EngineBuffer, CodecError> {
    if input.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    let data = decompress_size_prepended(input)?;
    EngineBuffer::copy_from_slice(&data)
}
