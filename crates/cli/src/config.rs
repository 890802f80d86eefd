use std::env;
use std::io;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use daemon::{Interval, IntervalError, ScheduleConfig};
use thiserror::Error;

use crate::command::{INTERVAL, LOG_FILE, ONCE, REPLICA, SOURCE, VERBOSE};

/// File name of the log written when no `LOG_FILE` operand is given.
pub const DEFAULT_LOG_FILE_NAME: &str = "dirmirror.log";

/// Errors that prevent the mirror from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required operand was absent from the parsed arguments.
    #[error("missing required operand {0}")]
    MissingOperand(&'static str),
    /// The interval operand was rejected.
    #[error("invalid INTERVAL_SECONDS: {0}")]
    Interval(#[from] IntervalError),
    /// The log file could not be opened for appending.
    #[error("failed to open log file '{}': {source}", path.display())]
    LogFile {
        /// Requested log path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub(crate) fn log_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::LogFile {
            path: path.into(),
            source,
        }
    }
}

/// Validated settings for one invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    source: PathBuf,
    replica: PathBuf,
    interval: Interval,
    log_file: PathBuf,
    once: bool,
    verbosity: u8,
}

impl Config {
    /// Builds a configuration from parsed command-line matches.
    pub fn from_matches(matches: &mut ArgMatches) -> Result<Self, ConfigError> {
        let source = matches
            .remove_one::<PathBuf>(SOURCE)
            .ok_or(ConfigError::MissingOperand("SOURCE"))?;
        let replica = matches
            .remove_one::<PathBuf>(REPLICA)
            .ok_or(ConfigError::MissingOperand("REPLICA"))?;
        let interval = matches
            .remove_one::<String>(INTERVAL)
            .ok_or(ConfigError::MissingOperand("INTERVAL_SECONDS"))?;
        let interval = Interval::parse(&interval)?;
        let log_file = matches
            .remove_one::<PathBuf>(LOG_FILE)
            .unwrap_or_else(default_log_file);

        Ok(Self {
            source,
            replica,
            interval,
            log_file,
            once: matches.get_flag(ONCE),
            verbosity: matches.get_count(VERBOSE),
        })
    }

    /// Source directory.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Replica directory.
    #[must_use]
    pub fn replica(&self) -> &Path {
        &self.replica
    }

    /// Pause between passes.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Operator log destination.
    #[must_use]
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Whether a single pass was requested.
    #[must_use]
    pub const fn once(&self) -> bool {
        self.once
    }

    /// Number of `-v` flags given.
    #[must_use]
    pub const fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Scheduler settings derived from this configuration.
    #[must_use]
    pub fn schedule(&self) -> ScheduleConfig {
        let max_passes = self.once.then_some(NonZeroU64::MIN);
        ScheduleConfig::new(&self.source, &self.replica, self.interval).with_max_passes(max_passes)
    }
}

/// Returns the log path used when none is given: `<temp dir>/dirmirror.log`.
#[must_use]
pub fn default_log_file() -> PathBuf {
    env::temp_dir().join(DEFAULT_LOG_FILE_NAME)
}
