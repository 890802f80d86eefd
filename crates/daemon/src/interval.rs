use std::fmt;
use std::num::{IntErrorKind, NonZeroU64};
use std::str::FromStr;
use std::time::Duration;

use crate::error::IntervalError;

/// Time between the end of one pass and the start of the next, in whole seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Interval(NonZeroU64);

impl Interval {
    /// Creates an interval from a non-zero number of seconds.
    #[must_use]
    pub const fn from_secs(seconds: NonZeroU64) -> Self {
        Self(seconds)
    }

    /// Parses a positive integer count of seconds.
    ///
    /// Surrounding whitespace is ignored. Zero, negative values and anything
    /// that is not an integer are rejected.
    pub fn parse(text: &str) -> Result<Self, IntervalError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(IntervalError::Empty);
        }
        let text = trimmed.to_owned();
        let value: i128 = match trimmed.parse() {
            Ok(value) => value,
            Err(source) => {
                return Err(match source.kind() {
                    IntErrorKind::PosOverflow => IntervalError::TooLarge { text },
                    IntErrorKind::NegOverflow => IntervalError::NotPositive { text },
                    _ => IntervalError::NotANumber { text, source },
                });
            }
        };
        if value <= 0 {
            return Err(IntervalError::NotPositive { text });
        }
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(IntervalError::TooLarge { text })
    }

    /// Returns the interval in seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0.get()
    }

    /// Converts the interval for the timer that suspends the loop.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0.get())
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
