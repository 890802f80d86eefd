#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging-sink` is the operator log of `dirmirror`. Every copy, deletion,
//! directory creation, pass start and pass failure becomes one line of the
//! form `<timestamp>: <message>` appended to a log file, with the bare message
//! echoed to the console.
//!
//! # Design
//!
//! - [`LogSink`] is the seam the scheduler writes through. Implementations
//!   receive undecorated messages.
//! - [`FileLogSink`] appends to a file opened in create+append mode and
//!   mirrors to any [`std::io::Write`] console.
//! - [`MemorySink`] keeps messages in memory for tests.
//! - [`LogClock`] renders timestamps with the `time` crate in local time,
//!   falling back to UTC.
//!
//! # Errors
//!
//! Sink operations surface the [`std::io::Error`] of the underlying writer.
//! Callers decide whether a failed log line matters; the scheduler reports it
//! as a diagnostic and keeps running.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{LogSink, MemorySink};
//!
//! let mut sink = MemorySink::new();
//! sink.log("Copied: a.txt").unwrap();
//! assert_eq!(sink.messages(), ["Copied: a.txt"]);
//! ```

mod sink;
mod timestamp;

pub use sink::{FileLogSink, LogSink, MemorySink};
pub use timestamp::{LOG_TIMESTAMP_FORMAT, LogClock, format_timestamp};
