//! File-level operations: read an input, run one codec call, write the result.
//!
//! Each [`Job`] is independent.  Several jobs (`-m`) run in parallel on the
//! rayon pool; results come back in job order so that stdout output is
//! never interleaved.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use crate::cli::op_mode::{Job, OpMode, Sink, Source};
use crate::displaylevel;
use crate::error::CodecError;
use crate::frame::{compress_prepend_size, decompress_size_prepended};

/// Settings shared by every job of one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub mode: OpMode,
    pub level: i32,
    pub force: bool,
}

/// Outcome of one successful job.
#[derive(Debug)]
pub struct Report {
    pub source: String,
    pub in_bytes: usize,
    pub out_bytes: usize,
    /// Output destined for stdout, written by the caller in job order.
    pub stdout: Option<Vec<u8>>,
}

impl Report {
    /// Per-file summary at display level 2.
    pub fn log(&self, mode: OpMode) {
        match mode {
            OpMode::Compress => {
                let ratio = if self.in_bytes == 0 {
                    0.0
                } else {
                    self.out_bytes as f64 * 100.0 / self.in_bytes as f64
                };
                displaylevel!(
                    2,
                    "{:<20} : {} bytes => {} bytes ({:.2}%) \n",
                    self.source,
                    self.in_bytes,
                    self.out_bytes,
                    ratio
                );
            }
            OpMode::Decompress => {
                displaylevel!(2, "{:<20} : decoded {} bytes \n", self.source, self.out_bytes);
            }
            OpMode::Test => {
                displaylevel!(2, "{:<20} : OK ({} bytes) \n", self.source, self.out_bytes);
            }
        }
    }
}

/// Run the codec over a whole buffer.
pub fn transform(data: &[u8], mode: OpMode, level: i32) -> Result<Vec<u8>, CodecError> {
    match mode {
        OpMode::Compress => compress_prepend_size(data, level),
        OpMode::Decompress | OpMode::Test => decompress_size_prepended(data),
    }
}

fn read_source(source: &Source) -> Result<Vec<u8>> {
    match source {
        Source::Stdin => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("refusing to read from a console");
            }
            let mut buf = Vec::new();
            stdin.lock().read_to_end(&mut buf).context("stdin: read error")?;
            Ok(buf)
        }
        Source::File(path) => {
            fs::read(path).with_context(|| format!("{}: cannot open", path.display()))
        }
    }
}

fn write_file(path: &Path, bytes: &[u8], force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("{}: already exists; use -f to overwrite", path.display());
    }
    fs::write(path, bytes).with_context(|| format!("{}: cannot write", path.display()))
}

/// Process one job.
pub fn process(job: &Job, opts: &Options) -> Result<Report> {
    let name = job.source.display_name();
    let data = read_source(&job.source)?;
    let out = transform(&data, opts.mode, opts.level).with_context(|| match opts.mode {
        OpMode::Compress => format!("{}: compression failed", name),
        OpMode::Decompress | OpMode::Test => format!("{}: decoding failed", name),
    })?;

    let out_bytes = out.len();
    let stdout = match &job.sink {
        Sink::Stdout => Some(out),
        Sink::File(path) => {
            write_file(path, &out, opts.force)?;
            None
        }
        Sink::Discard => None,
    };
    Ok(Report {
        source: name,
        in_bytes: data.len(),
        out_bytes,
        stdout,
    })
}

/// Process all jobs, in parallel when there is more than one.
pub fn run_jobs(jobs: &[Job], opts: &Options) -> Vec<Result<Report>> {
    if jobs.len() > 1 {
        displaylevel!(4, "processing {} files on {} threads \n", jobs.len(), rayon::current_num_threads());
        jobs.par_iter().map(|job| process(job, opts)).collect()
    } else {
        jobs.iter().map(|job| process(job, opts)).collect()
    }
}
