//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use faultline_config::{BookingConfig, Config, RuleOverrideConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                booking: BookingConfig::default(),
                ..Config::default()
            },
        }
    }

    /// Limit the number of bookable tables
    pub fn with_tables(mut self, tables: usize) -> Self {
        self.config.booking.tables = tables;
        self
    }

    /// Limit the party size of a single booking
    pub fn with_max_seats(mut self, max_seats: u32) -> Self {
        self.config.booking.max_seats = max_seats;
        self
    }

    /// Override the mapping rule for `kind`
    pub fn with_rule(mut self, kind: &str, rule: RuleOverrideConfig) -> Self {
        self.config.problems.rules.insert(kind.to_owned(), rule);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
