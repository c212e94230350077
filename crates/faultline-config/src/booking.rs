use serde::Deserialize;

/// Path every booking route is served under
pub const BOOKING_ROUTE_PREFIX: &str = "/booking";

/// Booking demo service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Largest party a single booking may seat
    #[serde(default = "default_max_seats")]
    pub max_seats: u32,
    /// Number of tables; bookings beyond this are rejected as over-booked
    #[serde(default = "default_tables")]
    pub tables: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_seats: default_max_seats(),
            tables: default_tables(),
        }
    }
}

const fn default_max_seats() -> u32 {
    20
}

const fn default_tables() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_restaurant() {
        let config: BookingConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_seats, 20);
        assert_eq!(config.tables, 10);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<BookingConfig>("chairs = 4").is_err());
    }
}
