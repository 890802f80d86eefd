use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

/// Program name used in usage text and diagnostics.
pub(crate) const PROGRAM_NAME: &str = "dirmirror";

pub(crate) const SOURCE: &str = "source";
pub(crate) const REPLICA: &str = "replica";
pub(crate) const INTERVAL: &str = "interval";
pub(crate) const LOG_FILE: &str = "log-file";
pub(crate) const ONCE: &str = "once";
pub(crate) const VERBOSE: &str = "verbose";

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Periodically mirrors the files of SOURCE into REPLICA.")
        .after_help(
            "Only the top-level regular files of SOURCE are mirrored. Replica files \
             missing from SOURCE are deleted. Press Enter to stop a running mirror.",
        )
        .arg(
            Arg::new(SOURCE)
                .value_name("SOURCE")
                .help("Directory whose files are mirrored.")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(REPLICA)
                .value_name("REPLICA")
                .help("Directory kept identical to SOURCE; created when missing.")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(INTERVAL)
                .value_name("INTERVAL_SECONDS")
                .help("Seconds to wait between passes.")
                .required(true)
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new(LOG_FILE)
                .value_name("LOG_FILE")
                .help("Append operator log lines to this file [default: <temp dir>/dirmirror.log].")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ONCE)
                .long("once")
                .help("Run a single pass and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(VERBOSE)
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output on stderr (repeatable).")
                .action(ArgAction::Count),
        )
}
