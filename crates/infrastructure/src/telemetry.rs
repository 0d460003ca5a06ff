//! Tracing subscriber setup.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "info";

static SUBSCRIBER_INSTALLED: OnceLock<()> = OnceLock::new();

/// Installs the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`
/// (usually [`DEFAULT_DIRECTIVE`]). Logs go to stderr so command output stays clean.
/// Calling this more than once is a no-op.
///
/// # Errors
///
/// Returns an error if another subscriber was already installed.
pub fn init_tracing(
    default_directive: &str,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    if SUBSCRIBER_INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    SUBSCRIBER_INSTALLED.set(()).ok();

    Ok(())
}
