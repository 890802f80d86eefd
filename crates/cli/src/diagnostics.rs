//! Developer diagnostics routed through `tracing`.
//!
//! Operator log lines never pass through here; they go to the
//! [`logging_sink::LogSink`]. This module only configures the `tracing`
//! subscriber that renders `debug!`/`trace!` output on stderr.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Maps the number of `-v` flags to the level applied to `dirmirror::*` targets.
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directives(verbosity: u8) -> String {
    format!("warn,dirmirror={}", level_for_verbosity(verbosity))
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling this more than once
/// is harmless: later calls leave the first subscriber in place.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let layer = fmt::layer().with_writer(io::stderr).with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels_escalate() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(3), "trace");
        assert_eq!(level_for_verbosity(u8::MAX), "trace");
    }

    #[test]
    fn directives_scope_level_to_workspace_targets() {
        assert_eq!(default_directives(0), "warn,dirmirror=warn");
        assert_eq!(default_directives(2), "warn,dirmirror=debug");
    }

    #[test]
    fn repeated_initialisation_does_not_panic() {
        init_tracing(0);
        init_tracing(3);
    }
}
