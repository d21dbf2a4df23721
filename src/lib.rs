// lz4-ffi: single-shot LZ4 block codec with a C-compatible buffer boundary

pub mod display;
pub mod config;
pub mod error;
pub mod block;
pub mod frame;
pub mod buffer;
pub mod api;
pub mod abi;
pub mod cli;

// ── Version constants ────────────────────────────────────────────────────────
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");
/// NUL-terminated copy of [`VERSION_STRING`] for the C ABI.
pub const VERSION_CSTR: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use api::{compress, compress_level, decompress};
pub use buffer::{live_handle_count, release, EngineBuffer};
pub use error::CodecError;
