// Integration tests for cli::args: clap definition of the lz4 command line.

use clap::Parser;
use lz4::cli::args::Cli;
use lz4::cli::op_mode::OpMode;
use lz4::config::{CLEVEL_MAX, CLEVEL_MIN};

#[test]
fn long_flags_match_short_flags() {
    let short = Cli::try_parse_from(["lz4", "-d", "-f", "-c", "-m", "-l", "4", "a"]).unwrap();
    let long = Cli::try_parse_from([
        "lz4", "--decompress", "--force", "--stdout", "--multiple", "--level", "4", "a",
    ])
    .unwrap();
    assert_eq!(short.op_mode(), long.op_mode());
    assert_eq!(short.c_level(), long.c_level());
    assert_eq!((short.force, short.stdout, short.multiple), (long.force, long.stdout, long.multiple));
    assert_eq!(short.files, long.files);
}

#[test]
fn combined_short_flags() {
    let cli = Cli::try_parse_from(["lz4", "-dfc", "x.lz4"]).unwrap();
    assert_eq!(cli.op_mode(), OpMode::Decompress);
    assert!(cli.force && cli.stdout);
}

#[test]
fn level_always_within_bounds() {
    for raw in ["-100", "0", "1", "5", "9", "10", "1000"] {
        let cli = Cli::try_parse_from(["lz4", "-l", raw]).unwrap();
        assert!((CLEVEL_MIN..=CLEVEL_MAX).contains(&cli.c_level()), "{raw}");
    }
}

#[test]
fn non_numeric_level_is_rejected() {
    assert!(Cli::try_parse_from(["lz4", "-l", "fast"]).is_err());
}

#[test]
fn dash_is_a_file_argument() {
    let cli = Cli::try_parse_from(["lz4", "-", "-"]).unwrap();
    assert_eq!(cli.files, vec!["-".to_string(), "-".to_string()]);
}
