use faultline_core::kind::{BUSINESS, NOT_FOUND};
use faultline_core::{ErrorKind, Fault};
use thiserror::Error;

/// No table is left for a new booking
pub static OVER_BOOKED: ErrorKind = ErrorKind::child("over-booked", &BUSINESS);

/// Kinds raised by this crate that the core does not define
pub static KINDS: [&ErrorKind; 1] = [&OVER_BOOKED];

pub type Result<T, E = BookingError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("The element of id {id} could not be found")]
    NotFound { id: u64 },

    #[error("{0}")]
    OverBooked(String),
}

impl BookingError {
    pub fn no_free_table() -> Self {
        Self::OverBooked("Sadly there's no free table at the moment".to_owned())
    }
}

impl Fault for BookingError {
    fn kind(&self) -> &'static ErrorKind {
        match self {
            Self::NotFound { .. } => &NOT_FOUND,
            Self::OverBooked(_) => &OVER_BOOKED,
        }
    }
}
