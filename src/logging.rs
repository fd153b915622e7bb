//! Diagnostic logging for gitcd.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! menu and messages meant for the user. The filter is read from `GITCD_LOG`
//! and defaults to warnings only.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "GITCD_LOG";

/// Initialize the stderr subscriber.
///
/// `verbose` raises the default level to `debug` when `GITCD_LOG` is unset.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
        .context("Failed to initialize logging subscriber")
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "gitcd=debug"
    } else {
        "gitcd=warn"
    }
}
