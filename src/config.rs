// config.rs: Compile-time configuration constants and environment overrides.
//
// Compression levels select a row of `block::types::LEVEL_TABLE`; the
// default may be overridden at runtime by the LZ4_CLEVEL environment
// variable (CLI only) or by the -l/--level flag.  The C ABI entry point
// `lz4_compress` always uses CLEVEL_DEFAULT so that its output depends only
// on its input.

use crate::displaylevel;

// Lowest selectable compression level (single-candidate hash probe with skip
// acceleration).
pub const CLEVEL_MIN: i32 = 1;

// Default compression level.
// Can be overridden by the LZ4_CLEVEL environment variable at runtime,
// or by the -l command-line flag.
pub const CLEVEL_DEFAULT: i32 = 1;

// Highest selectable compression level (256-candidate chain walk, lazy parse).
pub const CLEVEL_MAX: i32 = 9;

// Name of the environment variable consulted by the CLI.
pub const ENV_CLEVEL: &str = "LZ4_CLEVEL";

// Default display level (2 = normal, downgradable messages shown).
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

// Whether engine-owned buffers are tracked in the handle registry.
// On in debug builds and with the `handle-tracking` feature.
pub const HANDLE_TRACKING: bool = cfg!(any(debug_assertions, feature = "handle-tracking"));

// Number of released blocks held back from `free` while tracking, so that a
// second release of the same pointer is still recognised as stale.
pub const HANDLE_QUARANTINE: usize = 256;

/// Clamp any integer to the supported level range.
#[inline]
pub fn clamp_level(level: i32) -> i32 {
    level.clamp(CLEVEL_MIN, CLEVEL_MAX)
}

/// Read the default compression level from `LZ4_CLEVEL`, falling back to
/// [`CLEVEL_DEFAULT`].
pub fn init_c_level() -> i32 {
    init_c_level_from(std::env::var(ENV_CLEVEL).ok().as_deref())
}

/// Testable core of [`init_c_level`]: parse an optional `LZ4_CLEVEL` value.
///
/// Values outside `CLEVEL_MIN..=CLEVEL_MAX` are clamped; non-numeric values
/// are ignored with a warning at display level 2.
pub fn init_c_level_from(env_val: Option<&str>) -> i32 {
    if let Some(env) = env_val {
        match env.trim().parse::<u32>() {
            Ok(val) => return clamp_level(val.min(i32::MAX as u32) as i32),
            Err(_) => {
                displaylevel!(
                    2,
                    "Ignore environment variable setting {}={}: not a valid unsigned value \n",
                    ENV_CLEVEL,
                    env
                );
            }
        }
    }
    CLEVEL_DEFAULT
}
