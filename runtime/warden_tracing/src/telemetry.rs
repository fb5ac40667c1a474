use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber that writes human-readable logs to stdout.
///
/// The log filter is read from the `RUST_LOG` environment variable, falling back to
/// `default_filter` (e.g. `"info"`) if it's not set.
///
/// It fails if the filter is invalid or if a global subscriber has already been installed.
pub fn init_telemetry(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter_layer = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("`{default_filter}` is not a valid log filter"))?,
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the global `tracing` subscriber")?;
    Ok(())
}
