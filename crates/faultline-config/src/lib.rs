#![allow(clippy::must_use_candidate)]

pub mod booking;
mod env;
pub mod health;
mod loader;
pub mod problems;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use booking::{BOOKING_ROUTE_PREFIX, BookingConfig};
pub use env::ExpandError;
pub use health::HealthConfig;
pub use problems::{ProblemsConfig, RuleOverrideConfig};
pub use server::ServerConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Faultline configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Problem mapping overrides
    #[serde(default)]
    pub problems: ProblemsConfig,
    /// Booking demo service configuration
    #[serde(default)]
    pub booking: BookingConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
