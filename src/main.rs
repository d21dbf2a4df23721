//! Binary entry point for the `lz4` command-line tool.
//!
//! # Control flow
//!
//! 1. [`Cli::parse`] processes all flags.
//! 2. [`plan_jobs`] resolves inputs and output names.
//! 3. [`run_jobs`] runs one codec call per input (in parallel with `-m`).
//! 4. Stdout output is written in job order; the exit code is 1 if any job
//!    failed.

use std::io::Write;

use clap::Parser;

use lz4::cli::args::Cli;
use lz4::cli::constants::welcome_message;
use lz4::cli::files::{run_jobs, Options};
use lz4::cli::op_mode::{plan_jobs, OpMode};
use lz4::display::set_display_level;
use lz4::displaylevel;

fn run(cli: Cli) -> i32 {
    set_display_level(cli.display_level());
    displaylevel!(3, "{}", welcome_message());

    let opts = Options {
        mode: cli.op_mode(),
        level: cli.c_level(),
        force: cli.force,
    };
    if opts.mode == OpMode::Compress {
        displaylevel!(4, "Compression level : {} \n", opts.level);
    }

    let jobs = match plan_jobs(&cli.files, opts.mode, cli.stdout, cli.multiple) {
        Ok(jobs) => jobs,
        Err(e) => {
            displaylevel!(1, "lz4: {:#} \n", e);
            return 1;
        }
    };

    let mut failures = 0usize;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for result in run_jobs(&jobs, &opts) {
        match result {
            Ok(report) => {
                if let Some(bytes) = &report.stdout {
                    if let Err(e) = out.write_all(bytes) {
                        displaylevel!(1, "lz4: stdout: {} \n", e);
                        failures += 1;
                        continue;
                    }
                }
                report.log(opts.mode);
            }
            Err(e) => {
                displaylevel!(1, "lz4: {:#} \n", e);
                failures += 1;
            }
        }
    }
    if let Err(e) = out.flush() {
        displaylevel!(1, "lz4: stdout: {} \n", e);
        failures += 1;
    }

    if jobs.len() > 1 {
        displaylevel!(2, "{} files processed, {} failed \n", jobs.len(), failures);
    }
    if failures == 0 {
        0
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli));
}
