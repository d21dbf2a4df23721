// cli/constants.rs: Program identity strings and special file names.

// ── String / identity constants ──────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "lz4";
pub const LZ4_EXTENSION: &str = ".lz4";

// ── Special file names ───────────────────────────────────────────────────────
/// Stands for standard input (as an input) or standard output (as an output).
pub const STDIN_MARK: &str = "-";
pub const STDOUT_MARK: &str = "-";

/// Welcome banner shown at display level 3.
pub fn welcome_message() -> String {
    format!(
        "*** {} v{} {}-bit ***\n",
        COMPRESSOR_NAME,
        crate::VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    )
}
