use std::num::ParseIntError;

use thiserror::Error;

/// Reasons an interval argument is rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum IntervalError {
    /// The argument was empty.
    #[error("interval must not be empty")]
    Empty,
    /// The argument was not an integer.
    #[error("interval '{text}' is not a whole number of seconds: {source}")]
    NotANumber {
        /// Rejected input.
        text: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The argument was zero or negative.
    #[error("interval must be a positive number of seconds, got {text}")]
    NotPositive {
        /// Rejected input.
        text: String,
    },
    /// The argument does not fit in 64 bits.
    #[error("interval {text} is too large")]
    TooLarge {
        /// Rejected input.
        text: String,
    },
}
