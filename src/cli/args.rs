//! Command-line arguments.
//!
//! `lz4 [-z|-d|-t] [-l N] [-f] [-c] [-m] [-v|-q] [FILES...]`

use clap::{ArgAction, Parser};

use crate::cli::op_mode::OpMode;
use crate::config::{clamp_level, init_c_level, DISPLAY_LEVEL_DEFAULT};

#[derive(Parser, Debug)]
#[command(
    name = "lz4",
    version,
    about = "Compress or decompress files as size-prefixed LZ4 blocks"
)]
pub struct Cli {
    /// Compress (default)
    #[arg(short = 'z', long = "compress", conflicts_with_all = ["decompress", "test"])]
    pub compress: bool,

    /// Decompress
    #[arg(short = 'd', long = "decompress", conflicts_with = "test")]
    pub decompress: bool,

    /// Test compressed files: decode and discard
    #[arg(short = 't', long = "test")]
    pub test: bool,

    /// Compression level 1 (fastest) to 9 (densest); overrides LZ4_CLEVEL
    #[arg(short = 'l', long = "level", allow_negative_numbers = true)]
    pub level: Option<i32>,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Write to standard output
    #[arg(short = 'c', long = "stdout")]
    pub stdout: bool,

    /// Treat every file argument as an input, processed in parallel
    #[arg(short = 'm', long = "multiple")]
    pub multiple: bool,

    /// More messages (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Fewer messages (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Input file, then optional output file (`-` = stdin/stdout)
    pub files: Vec<String>,
}

impl Cli {
    pub fn op_mode(&self) -> OpMode {
        if self.test {
            OpMode::Test
        } else if self.decompress {
            OpMode::Decompress
        } else {
            OpMode::Compress
        }
    }

    /// Effective compression level: `-l`, else `LZ4_CLEVEL`, else the default.
    pub fn c_level(&self) -> i32 {
        match self.level {
            Some(level) => clamp_level(level),
            None => init_c_level(),
        }
    }

    /// Display level after applying `-v` and `-q`.
    pub fn display_level(&self) -> u32 {
        (DISPLAY_LEVEL_DEFAULT + self.verbose as u32).saturating_sub(self.quiet as u32)
    }
}
