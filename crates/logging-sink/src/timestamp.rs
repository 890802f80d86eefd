use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Layout of the timestamp that prefixes every log line.
pub const LOG_TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

const FALLBACK_TIMESTAMP: &str = "1970-01-01 00:00:00";

/// Source of wall-clock timestamps for log lines.
///
/// The local UTC offset is resolved once, when the clock is created. Looking
/// it up later can fail on Unix once other threads exist, so the sink must be
/// created before the stop listener is spawned; if the lookup fails the clock
/// falls back to UTC.
#[derive(Clone, Copy, Debug)]
pub struct LogClock {
    offset: UtcOffset,
}

impl LogClock {
    /// Creates a clock in the host's local time zone, or UTC if it is unknown.
    #[must_use]
    pub fn local() -> Self {
        Self {
            offset: UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        }
    }

    /// Creates a clock that renders timestamps in UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self {
            offset: UtcOffset::UTC,
        }
    }

    /// Renders the current time.
    #[must_use]
    pub fn now(&self) -> String {
        format_timestamp(OffsetDateTime::now_utc().to_offset(self.offset))
    }
}

/// Formats `moment` with [`LOG_TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_timestamp(moment: OffsetDateTime) -> String {
    moment
        .format(LOG_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| FALLBACK_TIMESTAMP.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_with_zero_padding() {
        let rendered = format_timestamp(datetime!(2024-03-05 07:08:09 UTC));
        assert_eq!(rendered, "2024-03-05 07:08:09");
    }

    #[test]
    fn utc_clock_produces_parseable_shape() {
        let now = LogClock::utc().now();
        assert_eq!(now.len(), FALLBACK_TIMESTAMP.len());
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], " ");
        assert_eq!(&now[13..14], ":");
    }
}
