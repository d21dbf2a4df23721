// display.rs: Diagnostics infrastructure shared by the library and the CLI.
//
// Every diagnostic goes to stderr and is gated by a single process-wide
// display level:
//
//   0 = no output; 1 = errors only; 2 = normal (downgradable);
//   3 = non-downgradable / verbose; 4 = debug
//
// The library itself only reports at level 4, so embedding processes see no
// output unless they raise the level with `set_display_level` (or `lz4 -vv`).

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::DISPLAY_LEVEL_DEFAULT;

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DISPLAY_LEVEL_DEFAULT);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
