//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "ESTIMAR_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "estimar=debug"
    } else {
        "estimar=warn"
    }
}

/// Initialize the estimar tracing/logging system.
///
/// Reads `ESTIMAR_LOG` for filter directives, e.g.
/// `ESTIMAR_LOG=estimar::estimators=debug`. Falls back to
/// `estimar=warn`, or `estimar=debug` when `verbose` is set.
/// Events go to stderr so that stdout carries only results.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // Another subscriber may already be installed by an embedding host.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
