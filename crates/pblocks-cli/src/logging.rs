//! Tracing subscriber setup.
//!
//! Logs go to stderr so `--json` output on stdout stays machine readable.

use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber, fmt, prelude::*};

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Install the global subscriber.
///
/// With `verbose`, everything at DEBUG and above is printed. Otherwise the
/// level comes from `RUST_LOG`, defaulting to "warn".
pub fn init(verbose: bool) -> InitResult {
    if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::debug!("Verbose mode enabled");
        return Ok(());
    }

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
