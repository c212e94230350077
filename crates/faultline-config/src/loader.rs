use std::path::Path;

use crate::Config;
use crate::booking::BOOKING_ROUTE_PREFIX;

/// Status codes a problem may carry
const PROBLEM_STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=599;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a problem override is malformed or the booking
    /// service limits are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_problem_rules()?;
        self.validate_booking()?;
        self.validate_health()?;
        Ok(())
    }

    fn validate_problem_rules(&self) -> anyhow::Result<()> {
        for (kind, rule) in &self.problems.rules {
            if kind.trim().is_empty() {
                anyhow::bail!("problems.rules contains an entry with an empty kind name");
            }

            if let Some(status) = rule.status
                && !PROBLEM_STATUS_RANGE.contains(&status)
            {
                anyhow::bail!("problems.rules.{kind}.status must be between 100 and 599, got {status}");
            }

            if rule.type_uri.as_deref().is_some_and(|t| t.trim().is_empty()) {
                anyhow::bail!("problems.rules.{kind}.type must not be empty");
            }
        }

        Ok(())
    }

    fn validate_booking(&self) -> anyhow::Result<()> {
        if self.booking.max_seats == 0 {
            anyhow::bail!("booking.max_seats must be greater than 0");
        }

        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if !health.enabled {
            return Ok(());
        }

        let path = health.path.as_str();
        if !path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{path}'");
        }

        // Route syntax would turn the health check into a capture or wildcard
        if path.contains(['{', '}', '*']) {
            anyhow::bail!("server.health.path must be a literal path, got '{path}'");
        }

        if path
            .strip_prefix(BOOKING_ROUTE_PREFIX)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        {
            anyhow::bail!(
                "server.health.path '{path}' collides with the booking routes under '{BOOKING_ROUTE_PREFIX}'"
            );
        }

        Ok(())
    }
}
