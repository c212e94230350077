use faultline_core::ValidationError;
use serde::{Deserialize, Serialize};

/// A stored table booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: u64,
    pub number_of_seats: u32,
    pub description: Option<String>,
    pub email: String,
}

/// Validated request for a new booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub number_of_seats: u32,
    pub description: Option<String>,
    pub email: String,
}

/// Booking as exchanged over HTTP
///
/// `id` is ignored on create; the store assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub number_of_seats: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub email: String,
}

impl BookingTo {
    /// Check field constraints and produce the booking to store
    ///
    /// # Errors
    ///
    /// Returns every violated constraint, keyed by wire field name
    pub fn validate(self, max_seats: u32) -> Result<NewBooking, ValidationError> {
        let mut violations = ValidationError::new();

        let seats = u32::try_from(self.number_of_seats)
            .ok()
            .filter(|seats| (1..=max_seats).contains(seats));
        if seats.is_none() {
            violations.push("numberOfSeats", format!("must be between 1 and {max_seats}"));
        }

        if !self.email.contains('@') {
            violations.push("email", "must be a valid email address");
        }

        violations.into_result()?;

        Ok(NewBooking {
            number_of_seats: seats.unwrap_or_default(),
            description: self.description,
            email: self.email,
        })
    }
}

impl From<Booking> for BookingTo {
    fn from(booking: Booking) -> Self {
        Self {
            id: Some(booking.id),
            number_of_seats: i64::from(booking.number_of_seats),
            description: booking.description,
            email: booking.email,
        }
    }
}
