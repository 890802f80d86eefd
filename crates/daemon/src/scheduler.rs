use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use engine::{PassSummary, ReconcileResult, SyncEvent, SyncEventHandler};
use logging_sink::LogSink;
use tracing::{debug, warn};

use crate::interval::Interval;
use crate::messages;
use crate::stop::StopSignal;

/// Settings for a scheduler run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleConfig {
    source: PathBuf,
    replica: PathBuf,
    interval: Interval,
    max_passes: Option<NonZeroU64>,
}

impl ScheduleConfig {
    /// Creates a configuration that runs until stopped.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, replica: impl Into<PathBuf>, interval: Interval) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
            interval,
            max_passes: None,
        }
    }

    /// Limits the run to `max_passes` passes. `None` runs until stopped.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: Option<NonZeroU64>) -> Self {
        self.max_passes = max_passes;
        self
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

    /// Pass limit, if any.
    #[must_use]
    pub const fn max_passes(&self) -> Option<NonZeroU64> {
        self.max_passes
    }
}

/// Totals accumulated over a scheduler run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunReport {
    passes: u64,
    failed_passes: u64,
    files_copied: u64,
    files_deleted: u64,
    file_failures: u64,
}

impl RunReport {
    fn absorb(&mut self, summary: &PassSummary) {
        self.files_copied += summary.files_copied();
        self.files_deleted += summary.files_deleted();
        self.file_failures += summary.failures().len() as u64;
    }

    /// Passes started, including those that failed.
    #[must_use]
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Passes abandoned with a pass-level error.
    #[must_use]
    pub const fn failed_passes(&self) -> u64 {
        self.failed_passes
    }

    /// Files copied across all passes.
    #[must_use]
    pub const fn files_copied(&self) -> u64 {
        self.files_copied
    }

    /// Files deleted across all passes.
    #[must_use]
    pub const fn files_deleted(&self) -> u64 {
        self.files_deleted
    }

    /// Per-file failures across all passes.
    #[must_use]
    pub const fn file_failures(&self) -> u64 {
        self.file_failures
    }
}

/// Forwards pass events to a [`LogSink`].
struct LoggingHandler<'a, S: ?Sized> {
    sink: &'a mut S,
}

impl<S> SyncEventHandler for LoggingHandler<'_, S>
where
    S: LogSink + ?Sized,
{
    fn handle(&mut self, event: SyncEvent<'_>) {
        emit(&mut *self.sink, &messages::describe(&event));
    }
}

fn emit<S>(sink: &mut S, message: &str)
where
    S: LogSink + ?Sized,
{
    if let Err(error) = sink.log(message) {
        warn!(target: "dirmirror::daemon", %error, line = message, "failed to write log line");
    }
}

/// Runs mirror passes until `stop` fires or the pass limit is reached.
pub fn run<S>(config: &ScheduleConfig, stop: &StopSignal, sink: &mut S) -> RunReport
where
    S: LogSink + ?Sized,
{
    run_with(config, stop, sink, |source, replica, handler| {
        engine::reconcile(source, replica, handler)
    })
}

/// Runs the scheduling loop around an arbitrary pass function.
///
/// The stop signal is consulted before every pass and while waiting between
/// passes, never during a pass. Errors returned by `pass` are logged and the
/// loop carries on with the next interval.
pub fn run_with<S, P>(config: &ScheduleConfig, stop: &StopSignal, sink: &mut S, mut pass: P) -> RunReport
where
    S: LogSink + ?Sized,
    P: FnMut(&Path, &Path, &mut dyn SyncEventHandler) -> ReconcileResult<PassSummary>,
{
    let mut report = RunReport::default();
    emit(sink, &messages::started(config.interval()));

    while !stop.is_stop_requested() {
        debug!(target: "dirmirror::daemon", pass = report.passes + 1, "starting pass");
        let outcome = {
            let mut handler = LoggingHandler { sink: &mut *sink };
            pass(config.source(), config.replica(), &mut handler)
        };
        report.passes += 1;

        match outcome {
            Ok(summary) => report.absorb(&summary),
            Err(error) => {
                report.failed_passes += 1;
                emit(sink, &messages::pass_error(&error));
            }
        }

        if config
            .max_passes()
            .is_some_and(|limit| report.passes >= limit.get())
        {
            break;
        }
        if stop.wait_timeout(config.interval().as_duration()) {
            break;
        }
    }

    emit(sink, messages::STOPPED);
    report
}
