// e2e/cli_integration.rs: CLI integration tests (Suite 05)
//
// Runs the `lz4` binary as a black box through std::process::Command.
// Covers argument parsing, compress/decompress/test dispatch, output naming,
// stdin/stdout plumbing, multiple inputs, and exit codes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Locate the `lz4` binary produced by Cargo.
fn lz4_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lz4"))
}

/// Create a TempDir containing a text file with ~4 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, LZ4!\n".repeat(341);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

fn lz4(args: &[&str], cwd: &Path) -> Output {
    Command::new(lz4_bin())
        .args(args)
        .current_dir(cwd)
        .env_remove("LZ4_CLEVEL")
        .output()
        .expect("failed to run lz4")
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let compressed = dir.path().join("output.lz4");
    let roundtrip = dir.path().join("roundtrip.txt");

    let out = lz4(&["-f", path_str(&input), path_str(&compressed)], dir.path());
    assert!(out.status.success(), "compress step should exit 0");
    let packed = fs::read(&compressed).unwrap();
    assert!(packed.len() < original.len());
    assert_eq!(&packed[..4], &(original.len() as u32).to_le_bytes());

    let out = lz4(&["-d", "-f", path_str(&compressed), path_str(&roundtrip)], dir.path());
    assert!(out.status.success(), "decompress step should exit 0");
    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

// ── 2. --version / --help ────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let out = lz4(&["--version"], Path::new("."));
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "version output should contain the package version, got: {stdout}"
    );
}

#[test]
fn test_cli_help() {
    let out = lz4(&["--help"], Path::new("."));
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout).to_lowercase();
    assert!(stdout.contains("usage"));
    assert!(stdout.contains("--decompress"));
}

#[test]
fn test_cli_conflicting_modes() {
    let (dir, input) = make_temp_input();
    let out = lz4(&["-z", "-d", path_str(&input)], dir.path());
    assert!(!out.status.success());
}

// ── 3. Automatic output names ────────────────────────────────────────────────

#[test]
fn test_cli_automatic_extension() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = lz4(&["input.txt"], dir.path());
    assert!(out.status.success());
    let packed = dir.path().join("input.txt.lz4");
    assert!(packed.exists(), "compress should append .lz4");
    assert!(input.exists(), "source file is kept");

    fs::remove_file(&input).unwrap();
    let out = lz4(&["-d", "input.txt.lz4"], dir.path());
    assert!(out.status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

#[test]
fn test_cli_decompress_without_extension_fails() {
    let (dir, _input) = make_temp_input();
    let out = lz4(&["-d", "input.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_cli_refuses_overwrite() {
    let (dir, input) = make_temp_input();
    let existing = dir.path().join("input.txt.lz4");
    fs::write(&existing, b"keep me").unwrap();

    let out = lz4(&[path_str(&input)], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&existing).unwrap(), b"keep me");

    let out = lz4(&["-f", path_str(&input)], dir.path());
    assert!(out.status.success());
    assert_ne!(fs::read(&existing).unwrap(), b"keep me");
}

// ── 4. Test mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_test_mode_valid() {
    let (dir, input) = make_temp_input();
    assert!(lz4(&[path_str(&input)], dir.path()).status.success());

    let out = lz4(&["-t", "input.txt.lz4"], dir.path());
    assert!(out.status.success());
    assert!(out.stdout.is_empty(), "test mode writes nothing to stdout");
}

#[test]
fn test_cli_test_mode_corrupt() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.lz4");
    // Declares 64 bytes, back-reference before the start of output.
    fs::write(&bad, [64, 0, 0, 0, 0x10, b'a', 0x09, 0x00, 0x50, 1, 2, 3, 4, 5]).unwrap();

    let out = lz4(&["-t", "bad.lz4"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty(), "failure should be reported on stderr");
}

#[test]
fn test_cli_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let out = lz4(&["does_not_exist.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

// ── 5. stdin / stdout ────────────────────────────────────────────────────────

#[test]
fn test_cli_stdout_flag() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = lz4(&["-c", "input.txt"], dir.path());
    assert!(out.status.success());
    assert!(!dir.path().join("input.txt.lz4").exists(), "-c must not create a file");
    assert_eq!(lz4::decompress(&out.stdout).unwrap().as_slice(), &original[..]);
}

#[test]
fn test_cli_stdin_pipeline() {
    let data = b"piped through standard input ".repeat(64);

    let mut child = Command::new(lz4_bin())
        .arg("-")
        .env_remove("LZ4_CLEVEL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn lz4");
    child.stdin.take().unwrap().write_all(&data).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let mut child = Command::new(lz4_bin())
        .arg("-d")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn lz4 -d");
    child.stdin.take().unwrap().write_all(&out.stdout).unwrap();
    let back = child.wait_with_output().unwrap();
    assert!(back.status.success());
    assert_eq!(back.stdout, data);
}

// ── 6. Multiple inputs ───────────────────────────────────────────────────────

#[test]
fn test_cli_multiple_files() {
    let dir = TempDir::new().unwrap();
    let names = ["a.txt", "b.txt", "c.txt", "d.txt"];
    for (i, name) in names.iter().enumerate() {
        fs::write(dir.path().join(name), format!("file {i} ").repeat(200 * (i + 1))).unwrap();
    }

    let out = lz4(&["-m", "a.txt", "b.txt", "c.txt", "d.txt"], dir.path());
    assert!(out.status.success());
    for name in names {
        assert!(dir.path().join(format!("{name}.lz4")).exists());
        fs::remove_file(dir.path().join(name)).unwrap();
    }

    let out = lz4(&["-d", "-m", "a.txt.lz4", "b.txt.lz4", "c.txt.lz4", "d.txt.lz4"], dir.path());
    assert!(out.status.success());
    for (i, name) in names.iter().enumerate() {
        assert_eq!(
            fs::read_to_string(dir.path().join(name)).unwrap(),
            format!("file {i} ").repeat(200 * (i + 1))
        );
    }
}

#[test]
fn test_cli_multiple_with_one_failure() {
    let (dir, _input) = make_temp_input();
    let out = lz4(&["-m", "input.txt", "missing.txt"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(dir.path().join("input.txt.lz4").exists(), "the good input is still processed");
}

#[test]
fn test_cli_too_many_files_without_multiple() {
    let (dir, _input) = make_temp_input();
    let out = lz4(&["input.txt", "a", "b"], dir.path());
    assert_eq!(out.status.code(), Some(1));
}

// ── 7. Levels ────────────────────────────────────────────────────────────────

#[test]
fn test_cli_levels_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    for level in ["1", "5", "9"] {
        let out = lz4(&["-c", "-l", level, "input.txt"], dir.path());
        assert!(out.status.success(), "level {level}");
        assert_eq!(lz4::decompress(&out.stdout).unwrap().as_slice(), &original[..]);
    }
}

#[test]
fn test_cli_env_level() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    for value in ["9", "garbage"] {
        let out = Command::new(lz4_bin())
            .args(["-c", "input.txt"])
            .current_dir(dir.path())
            .env("LZ4_CLEVEL", value)
            .output()
            .unwrap();
        assert!(out.status.success(), "LZ4_CLEVEL={value}");
        assert_eq!(lz4::decompress(&out.stdout).unwrap().as_slice(), &original[..]);
    }
}
