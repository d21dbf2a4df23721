//! Error kinds shared by the codec, the buffer layer and the C ABI.
//!
//! Every variant carries a stable numeric code (see [`CodecError::code`]) so
//! that the ABI can report failures through `lz4_last_error` without exposing
//! Rust types across the boundary.  Code `0` is reserved for "no error".

use std::ffi::CStr;
use std::fmt;

/// Errors reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecError {
    /// Zero-length input (or a zero-length result) at the engine boundary.
    EmptyInput,
    /// An allocation inside encode/decode failed.
    OutOfMemory,
    /// A back-reference points before the start of the produced output, a
    /// distance is zero, or the stream produces more output than declared.
    CorruptStream,
    /// The stream ended before a token's declared length was satisfied.
    TruncatedStream,
    /// The codec implementation could not be loaded.  Never produced by the
    /// linked engine; reserved for adapters that load it dynamically.
    EngineUnavailable,
    /// Input exceeds [`LZ4_MAX_INPUT_SIZE`](crate::block::types::LZ4_MAX_INPUT_SIZE).
    InputTooLarge,
    /// A required pointer argument was null or a parameter was out of range.
    InvalidArgument,
    /// `release` was called on a pointer the engine does not own.
    InvalidHandle,
}

impl CodecError {
    /// All variants in code order (codes `1..=8`).
    pub const ALL: [CodecError; 8] = [
        CodecError::EmptyInput,
        CodecError::OutOfMemory,
        CodecError::CorruptStream,
        CodecError::TruncatedStream,
        CodecError::EngineUnavailable,
        CodecError::InputTooLarge,
        CodecError::InvalidArgument,
        CodecError::InvalidHandle,
    ];

    /// Stable numeric code used across the C ABI.
    pub fn code(self) -> i32 {
        match self {
            CodecError::EmptyInput => 1,
            CodecError::OutOfMemory => 2,
            CodecError::CorruptStream => 3,
            CodecError::TruncatedStream => 4,
            CodecError::EngineUnavailable => 5,
            CodecError::InputTooLarge => 6,
            CodecError::InvalidArgument => 7,
            CodecError::InvalidHandle => 8,
        }
    }

    /// Inverse of [`code`](Self::code).  Returns `None` for `0` and for
    /// unknown codes.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }

    /// Short, stable identifier for the error.
    pub fn error_name(self) -> &'static str {
        match self {
            CodecError::EmptyInput => "ERROR_empty_input",
            CodecError::OutOfMemory => "ERROR_out_of_memory",
            CodecError::CorruptStream => "ERROR_corrupt_stream",
            CodecError::TruncatedStream => "ERROR_truncated_stream",
            CodecError::EngineUnavailable => "ERROR_engine_unavailable",
            CodecError::InputTooLarge => "ERROR_input_too_large",
            CodecError::InvalidArgument => "ERROR_invalid_argument",
            CodecError::InvalidHandle => "ERROR_invalid_handle",
        }
    }

    /// Description with its NUL terminator; the single source for both
    /// [`description`](Self::description) and the C ABI string.
    fn description_nul(self) -> &'static str {
        match self {
            CodecError::EmptyInput => "empty input\0",
            CodecError::OutOfMemory => "memory allocation failed\0",
            CodecError::CorruptStream => "corrupt compressed stream\0",
            CodecError::TruncatedStream => "truncated compressed stream\0",
            CodecError::EngineUnavailable => "codec engine unavailable\0",
            CodecError::InputTooLarge => "input too large\0",
            CodecError::InvalidArgument => "invalid argument\0",
            CodecError::InvalidHandle => "buffer handle not owned by the engine\0",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        self.description_nul().trim_end_matches('\0')
    }

    /// [`description`](Self::description) as a C string.
    pub fn c_description(self) -> &'static CStr {
        CStr::from_bytes_with_nul(self.description_nul().as_bytes()).unwrap_or_default()
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl std::error::Error for CodecError {}

impl From<std::collections::TryReserveError> for CodecError {
    fn from(_: std::collections::TryReserveError) -> Self {
        CodecError::OutOfMemory
    }
}
