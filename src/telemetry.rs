//! Tracing subscriber setup for the binary.

use crate::config::{AppConfig, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the event filter: `RUST_LOG` when set and valid, otherwise the
/// configured level.
#[must_use]
pub fn filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(config: &AppConfig) {
    let registry = tracing_subscriber::registry().with(filter(config));
    let installed = match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
