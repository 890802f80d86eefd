use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::stop::StopSignal;

/// What the listener does when its input reaches end-of-file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopOnEof {
    /// Treat EOF like a line and request a stop.
    Yes,
    /// Ignore EOF and leave the scheduler running.
    No,
}

/// Blocks until `reader` yields a line, then requests a stop.
///
/// Returns whether a stop was requested. Read errors end the listener without
/// touching the signal.
pub fn listen_for_line<R>(mut reader: R, stop: &StopSignal, on_eof: StopOnEof) -> bool
where
    R: BufRead,
{
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) if on_eof == StopOnEof::No => {
            debug!(target: "dirmirror::daemon", "stop listener input closed");
            false
        }
        Ok(_) => {
            stop.request_stop();
            true
        }
        Err(error) => {
            debug!(target: "dirmirror::daemon", %error, "stop listener failed to read input");
            false
        }
    }
}

/// Spawns the thread that stops the scheduler when a line arrives on stdin.
pub fn spawn_stdin_listener(stop: StopSignal, on_eof: StopOnEof) -> io::Result<JoinHandle<bool>> {
    thread::Builder::new()
        .name("dirmirror-stdin".to_owned())
        .spawn(move || listen_for_line(io::stdin().lock(), &stop, on_eof))
}
