//! Logging bootstrap shared by the binaries.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global `tracing` subscriber.
///
/// The filter is read from `RUST_LOG`; when unset, `default_directive` is
/// used (e.g. `"info"`). Output goes to stderr so that command output on
/// stdout stays clean.
///
/// Call once per process, before any other work.
pub fn init_logging(default_directive: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
