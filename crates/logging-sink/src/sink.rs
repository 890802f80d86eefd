use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::timestamp::LogClock;

/// Destination for operator-facing log messages.
///
/// Each call records exactly one message. Implementations decide how the
/// message is decorated; callers pass the bare text.
pub trait LogSink {
    /// Records `message`.
    fn log(&mut self, message: &str) -> io::Result<()>;
}

impl<S> LogSink for &mut S
where
    S: LogSink + ?Sized,
{
    fn log(&mut self, message: &str) -> io::Result<()> {
        (**self).log(message)
    }
}

/// Log sink that appends `<timestamp>: <message>` lines to a file and echoes
/// the bare message to a console writer.
///
/// The file is opened in append mode and never truncated, so several runs
/// accumulate in the same log.
#[derive(Debug)]
pub struct FileLogSink<C> {
    file: File,
    path: PathBuf,
    console: C,
    clock: LogClock,
}

impl<C> FileLogSink<C>
where
    C: Write,
{
    /// Opens (creating if needed) the log file at `path` in append mode.
    pub fn open(path: impl Into<PathBuf>, console: C) -> io::Result<Self> {
        Self::open_with_clock(path, console, LogClock::local())
    }

    /// Opens the log file with an explicit clock.
    pub fn open_with_clock(
        path: impl Into<PathBuf>,
        console: C,
        clock: LogClock,
    ) -> io::Result<Self> {
        let path = path.into();
        let file = open_log_file(&path)?;
        Ok(Self {
            file,
            path,
            console,
            clock,
        })
    }

    /// Returns the log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the console writer.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Consumes the sink and returns the console writer.
    pub fn into_console(self) -> C {
        self.console
    }
}

impl<C> LogSink for FileLogSink<C>
where
    C: Write,
{
    fn log(&mut self, message: &str) -> io::Result<()> {
        let line = format!("{}: {message}\n", self.clock.now());
        // The file is the record of truth; write it before the console so a
        // broken terminal never costs a log line.
        let file_result = self.file.write_all(line.as_bytes());
        let console_result = writeln!(self.console, "{message}").and_then(|()| self.console.flush());
        file_result.and(console_result)
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        options.mode(0o666);
    }
    options.open(path)
}

/// Log sink that keeps messages in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    messages: Vec<String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded messages in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Reports whether any recorded message equals `message`.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|recorded| recorded == message)
    }

    /// Consumes the sink and returns the recorded messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl LogSink for MemorySink {
    fn log(&mut self, message: &str) -> io::Result<()> {
        self.messages.push(message.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn split_line(line: &str) -> (&str, &str) {
        line.split_once(": ").expect("line has a timestamp prefix")
    }

    #[test]
    fn file_sink_writes_timestamped_lines_and_mirrors_console() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sync.log");

        let mut sink =
            FileLogSink::open_with_clock(&path, Vec::new(), LogClock::utc()).expect("open log");
        sink.log("Copied: a.txt").expect("log copy");
        sink.log("Deleted: c.txt").expect("log delete");
        assert_eq!(sink.path(), path.as_path());

        let console = String::from_utf8(sink.into_console()).expect("utf-8 console");
        assert_eq!(console, "Copied: a.txt\nDeleted: c.txt\n");

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let (stamp, message) = split_line(lines[0]);
        assert_eq!(stamp.len(), "2024-01-01 00:00:00".len());
        assert_eq!(message, "Copied: a.txt");
        assert_eq!(split_line(lines[1]).1, "Deleted: c.txt");
    }

    #[test]
    fn reopening_appends_instead_of_truncating() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("sync.log");

        for message in ["first run", "second run"] {
            let mut sink = FileLogSink::open_with_clock(&path, io::sink(), LogClock::utc())
                .expect("open log");
            sink.log(message).expect("log");
        }

        let contents = fs::read_to_string(&path).expect("read log");
        let messages: Vec<_> = contents.lines().map(|line| split_line(line).1).collect();
        assert_eq!(messages, ["first run", "second run"]);
    }

    #[test]
    fn open_fails_when_parent_is_missing() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("missing").join("sync.log");
        let error = FileLogSink::open(&path, io::sink()).expect_err("parent missing");
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }

    fn log_through<S: LogSink>(mut sink: S, message: &str) {
        sink.log(message).expect("log through borrowed sink");
    }

    #[test]
    fn memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        log_through(&mut sink, "one");
        sink.log("two").expect("log two");

        assert!(sink.contains("one"));
        assert_eq!(sink.into_messages(), ["one", "two"]);
    }
}
