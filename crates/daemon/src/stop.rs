use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Granularity at which [`StopSignal::wait_timeout`] re-checks the flag.
pub const STOP_POLL_SLICE: Duration = Duration::from_millis(100);

/// Cooperative stop request shared between the scheduler and its listener.
///
/// Clones observe the same flag. Once set, the flag stays set.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    requested: Arc<AtomicBool>,
}

impl StopSignal {
    /// Creates a signal that has not been triggered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signal that is already triggered.
    #[must_use]
    pub fn stopped() -> Self {
        let signal = Self::new();
        signal.request_stop();
        signal
    }

    /// Requests that the scheduler stop at its next checkpoint.
    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Reports whether a stop has been requested.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Blocks for up to `timeout`, returning early once a stop is requested.
    ///
    /// Returns `true` when the wait ended because of a stop request. The flag
    /// is polled every [`STOP_POLL_SLICE`], which bounds shutdown latency.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if self.is_stop_requested() {
                return true;
            }
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => STOP_POLL_SLICE,
            };
            if remaining.is_zero() {
                return self.is_stop_requested();
            }
            thread::sleep(remaining.min(STOP_POLL_SLICE));
        }
    }
}
