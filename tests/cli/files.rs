// Integration tests for cli::files: whole-file codec runs.

use std::fs;

use lz4::cli::files::{process, run_jobs, transform, Options};
use lz4::cli::op_mode::{Job, OpMode, Sink, Source};
use lz4::frame::decompress_size_prepended;
use tempfile::TempDir;

#[test]
fn compressed_file_is_a_frame() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    let output = dir.path().join("data.bin.lz4");
    let content: Vec<u8> = (0..50_000u32).map(|i| (i / 100) as u8).collect();
    fs::write(&input, &content).unwrap();

    let job = Job { source: Source::File(input), sink: Sink::File(output.clone()) };
    let opts = Options { mode: OpMode::Compress, level: 5, force: false };
    let report = process(&job, &opts).unwrap();
    assert_eq!(report.in_bytes, content.len());
    assert!(report.out_bytes < content.len());

    let framed = fs::read(&output).unwrap();
    assert_eq!(framed.len(), report.out_bytes);
    assert_eq!(decompress_size_prepended(&framed).unwrap(), content);
}

#[test]
fn empty_file_round_trips() {
    let packed = transform(&[], OpMode::Compress, 1).unwrap();
    assert_eq!(packed, vec![0, 0, 0, 0, 0]);
    assert!(transform(&packed, OpMode::Decompress, 1).unwrap().is_empty());
}

#[test]
fn one_bad_file_does_not_stop_the_others() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.lz4");
    let bad = dir.path().join("bad.lz4");
    fs::write(&good, transform(b"good good good good", OpMode::Compress, 1).unwrap()).unwrap();
    fs::write(&bad, b"\x10\x00\x00\x00garbage").unwrap();

    let jobs = vec![
        Job { source: Source::File(good), sink: Sink::Discard },
        Job { source: Source::File(bad), sink: Sink::Discard },
        Job { source: Source::File(dir.path().join("missing.lz4")), sink: Sink::Discard },
    ];
    let opts = Options { mode: OpMode::Test, level: 1, force: false };
    let results = run_jobs(&jobs, &opts);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_err());
}
