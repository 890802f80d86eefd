#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `daemon` keeps a replica in step with its source by running
//! [`engine::reconcile`] over and over with a fixed pause in between, until
//! the operator asks it to stop.
//!
//! # Design
//!
//! - [`run`] drives the loop: log the start, run a pass, log its events,
//!   wait [`Interval`], repeat. [`run_with`] accepts any pass function so the
//!   loop can be exercised without touching the filesystem.
//! - [`StopSignal`] is the only state shared with other threads. It is passed
//!   in explicitly; there is no process-wide flag.
//! - [`spawn_stdin_listener`] starts the single helper thread that turns a
//!   line on standard input into a stop request.
//!
//! # Invariants
//!
//! - Passes never overlap and a pass in progress always completes.
//! - A failed pass never ends the loop; only the stop signal or the optional
//!   pass limit does.
//! - The interval stays in seconds until the moment the loop waits.
//!
//! # Examples
//!
//! ```
//! use daemon::{Interval, ScheduleConfig, StopSignal, run};
//! use logging_sink::MemorySink;
//! use std::num::NonZeroU64;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("source");
//! std::fs::create_dir(&source)?;
//! std::fs::write(source.join("a.txt"), b"1")?;
//!
//! let config = ScheduleConfig::new(&source, temp.path().join("replica"), Interval::parse("60")?)
//!     .with_max_passes(NonZeroU64::new(1));
//! let mut sink = MemorySink::new();
//! let report = run(&config, &StopSignal::new(), &mut sink);
//!
//! assert_eq!(report.passes(), 1);
//! assert!(sink.contains("Copied: a.txt"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod interval;
mod listener;
pub mod messages;
mod scheduler;
mod stop;

pub use error::IntervalError;
pub use interval::Interval;
pub use listener::{StopOnEof, listen_for_line, spawn_stdin_listener};
pub use scheduler::{RunReport, ScheduleConfig, run, run_with};
pub use stop::{STOP_POLL_SLICE, StopSignal};
