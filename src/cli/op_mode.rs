//! Operation mode and per-file job planning for the CLI.
//!
//! This module provides:
//! - [`OpMode`]: what the CLI should do with each input.
//! - [`output_filename`]: derives the output name from the input name.
//! - [`plan_jobs`]: turns the positional arguments into a list of [`Job`]s.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::constants::{LZ4_EXTENSION, STDIN_MARK, STDOUT_MARK};
use crate::displaylevel;

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Compress input into a size-prefixed frame.
    Compress,
    /// Decompress a size-prefixed frame.
    Decompress,
    /// Decompress and discard, reporting only success or failure.
    Test,
}

/// Where a job reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

/// Where a job writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
    Discard,
}

/// One input processed by one codec call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source: Source,
    pub sink: Sink,
}

impl Source {
    fn from_arg(arg: &str) -> Self {
        if arg == STDIN_MARK {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Name used in messages.
    pub fn display_name(&self) -> String {
        match self {
            Source::Stdin => "stdin".to_owned(),
            Source::File(p) => p.display().to_string(),
        }
    }
}

/// Derive the output filename for `input` in `mode`.
///
/// Compression appends `.lz4`; decompression strips it and fails when the
/// input does not carry the extension.
pub fn output_filename(input: &str, mode: OpMode) -> Result<String> {
    match mode {
        OpMode::Compress => Ok(format!("{}{}", input, LZ4_EXTENSION)),
        OpMode::Decompress | OpMode::Test => match input.strip_suffix(LZ4_EXTENSION) {
            Some(base) if !base.is_empty() => Ok(base.to_owned()),
            _ => bail!("{}: cannot determine an output filename (no {} suffix)", input, LZ4_EXTENSION),
        },
    }
}

fn auto_sink(input: &str, mode: OpMode, to_stdout: bool) -> Result<Sink> {
    if mode == OpMode::Test {
        return Ok(Sink::Discard);
    }
    if to_stdout || input == STDIN_MARK {
        return Ok(Sink::Stdout);
    }
    let out = output_filename(input, mode)?;
    displaylevel!(3, "{} : output filename will be {} \n", input, out);
    Ok(Sink::File(PathBuf::from(out)))
}

/// Turn positional arguments into jobs.
///
/// Without `multiple`, `files` is `[input [output]]`; no input means stdin.
/// With `multiple`, every argument is an input with an automatic output
/// name (or stdout with `-c`).
pub fn plan_jobs(files: &[String], mode: OpMode, to_stdout: bool, multiple: bool) -> Result<Vec<Job>> {
    if multiple {
        if files.is_empty() {
            bail!("-m requires at least one input file");
        }
        return files
            .iter()
            .map(|f| {
                Ok(Job {
                    source: Source::from_arg(f),
                    sink: auto_sink(f, mode, to_stdout)?,
                })
            })
            .collect();
    }

    if files.len() > 2 {
        bail!("too many file names ({}); use -m to process multiple inputs", files.len());
    }
    let input = files.first().map(String::as_str).unwrap_or(STDIN_MARK);
    let sink = match files.get(1) {
        _ if mode == OpMode::Test => Sink::Discard,
        Some(out) if out == STDOUT_MARK => Sink::Stdout,
        Some(out) if !to_stdout => Sink::File(PathBuf::from(out)),
        _ => auto_sink(input, mode, to_stdout)?,
    };
    Ok(vec![Job {
        source: Source::from_arg(input),
        sink,
    }])
}
