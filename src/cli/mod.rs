//! Command-line interface for the `lz4` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and special file names (`-`, `.lz4`). |
//! | [`args`]      | clap definition (`Cli`) of flags and positional files. |
//! | [`op_mode`]   | `OpMode`, output-name resolution and per-file `Job` planning. |
//! | [`files`]     | Reading inputs, running the codec, writing outputs. |
//!
//! Typical call sequence: `Cli::parse`, then `op_mode::plan_jobs`, then `files::run_jobs`.

pub mod constants;
pub mod args;
pub mod op_mode;
pub mod files;
