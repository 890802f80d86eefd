#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end of `dirmirror`. It parses
//! `dirmirror [OPTIONS] <SOURCE> <REPLICA> <INTERVAL_SECONDS> [LOG_FILE]`,
//! opens the operator log, installs the `tracing` subscriber, and hands the
//! validated [`Config`] to [`daemon::run`].
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error so the whole front-end can be driven from tests.
//! A [`clap`](https://docs.rs/clap/) builder performs the parse; help and
//! version requests are written to standard output, usage errors to standard
//! error. Unless `--once` is given a background thread waits for a line on
//! standard input and fires the [`daemon::StopSignal`].
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - The log file is opened before any thread is spawned.
//! - Operator messages are mirrored to the supplied `stdout` handle.
//!
//! # Errors
//!
//! Usage errors and [`ConfigError`]s return exit code `1`. With `--once` the
//! exit code is also `1` when the pass failed or any file could not be
//! mirrored. A continuous run that was stopped returns `0`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["dirmirror", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8_lossy(&stdout).starts_with("dirmirror "));
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use daemon::{StopOnEof, StopSignal};
use logging_sink::FileLogSink;
use tracing::{debug, warn};

mod command;
mod config;
mod diagnostics;

pub use config::{Config, ConfigError, DEFAULT_LOG_FILE_NAME, default_log_file};
pub use diagnostics::{default_directives, init_tracing, level_for_verbosity};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Console hint shown while a continuous mirror is running.
pub const PRESS_ENTER_HINT: &str = "Press [Enter] to close the program.";

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(command::PROGRAM_NAME));
    }

    let mut matches = match command::clap_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => return report_clap_error(&error, stdout, stderr),
    };

    match Config::from_matches(&mut matches) {
        Ok(config) => execute(&config, stdout, stderr),
        Err(error) => {
            let _ = writeln!(stderr, "{}: {error}", command::PROGRAM_NAME);
            1
        }
    }
}

fn report_clap_error<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let rendered = error.render();
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(stdout, "{rendered}").is_err() {
                return 1;
            }
            0
        }
        _ => {
            let _ = write!(stderr, "{rendered}");
            1
        }
    }
}

fn execute<Out, Err>(config: &Config, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    init_tracing(config.verbosity());

    let mut sink = match FileLogSink::open(config.log_file(), &mut *stdout) {
        Ok(sink) => sink,
        Err(error) => {
            let error = ConfigError::log_file(config.log_file(), error);
            let _ = writeln!(stderr, "{}: {error}", command::PROGRAM_NAME);
            return 1;
        }
    };
    debug!(target: "dirmirror::cli", log_file = %config.log_file().display(), "opened operator log");

    let stop = StopSignal::new();
    if !config.once() {
        let _ = writeln!(sink.console_mut(), "{PRESS_ENTER_HINT}");
        if let Err(error) = daemon::spawn_stdin_listener(stop.clone(), StopOnEof::No) {
            warn!(target: "dirmirror::cli", %error, "failed to start the stdin listener");
        }
    }

    let report = daemon::run(&config.schedule(), &stop, &mut sink);
    debug!(
        target: "dirmirror::cli",
        passes = report.passes(),
        failed_passes = report.failed_passes(),
        copied = report.files_copied(),
        deleted = report.files_deleted(),
        file_failures = report.file_failures(),
        "mirror finished"
    );

    if config.once() && (report.failed_passes() > 0 || report.file_failures() > 0) {
        1
    } else {
        0
    }
}

/// Converts a numeric exit code into an [`ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests;
