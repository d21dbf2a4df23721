// Integration tests for cli::op_mode: output naming and job planning.

use std::path::PathBuf;

use lz4::cli::op_mode::{output_filename, plan_jobs, OpMode, Sink, Source};

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn compress_then_decompress_names_invert() {
    for name in ["a", "dir/b.txt", "c.tar"] {
        let packed = output_filename(name, OpMode::Compress).unwrap();
        assert_eq!(output_filename(&packed, OpMode::Decompress).unwrap(), name);
    }
}

#[test]
fn stdin_input_with_multiple_goes_to_stdout() {
    let jobs = plan_jobs(&strings(&["-", "b"]), OpMode::Compress, false, true).unwrap();
    assert_eq!(jobs[0].source, Source::Stdin);
    assert_eq!(jobs[0].sink, Sink::Stdout);
    assert_eq!(jobs[1].sink, Sink::File(PathBuf::from("b.lz4")));
}

#[test]
fn multiple_with_stdout_flag() {
    let jobs = plan_jobs(&strings(&["a", "b"]), OpMode::Compress, true, true).unwrap();
    assert!(jobs.iter().all(|j| j.sink == Sink::Stdout));
}

#[test]
fn multiple_decompress_requires_extension() {
    assert!(plan_jobs(&strings(&["a.lz4", "b.txt"]), OpMode::Decompress, false, true).is_err());
}

#[test]
fn multiple_test_mode_discards_all() {
    let jobs = plan_jobs(&strings(&["a.lz4", "b.txt"]), OpMode::Test, false, true).unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.sink == Sink::Discard));
}

#[test]
fn source_display_names() {
    let jobs = plan_jobs(&strings(&["-"]), OpMode::Compress, false, false).unwrap();
    assert_eq!(jobs[0].source.display_name(), "stdin");
}
