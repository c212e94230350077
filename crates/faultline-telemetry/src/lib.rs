//! Logging setup for faultline
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a fmt
//! layer, either human-readable or JSON.

#![allow(clippy::must_use_candidate)]

use faultline_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive to use: `RUST_LOG`, then the configured filter, then `default`
pub fn filter_directive(config: Option<&TelemetryConfig>, default: &str) -> String {
    if let Ok(directive) = std::env::var(EnvFilter::DEFAULT_ENV)
        && !directive.trim().is_empty()
    {
        return directive;
    }

    config
        .and_then(|c| c.log_filter.clone())
        .unwrap_or_else(|| default.to_owned())
}

/// Install the global subscriber
///
/// An unparseable directive falls back to `info` rather than failing startup.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    let directive = filter_directive(config, default_filter);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{directive}': {e}, using 'info'");
        EnvFilter::new("info")
    });

    let format = config.map(|c| c.format).unwrap_or_default();

    match format {
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);

            tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .flatten_event(true);

            tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;
        }
    }

    Ok(())
}
