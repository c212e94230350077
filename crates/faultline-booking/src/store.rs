use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{BookingError, Result};
use crate::types::{Booking, NewBooking};

/// Storage for restaurant bookings
#[async_trait]
pub trait BookingManagement: Send + Sync {
    /// Booking with `id`
    async fn get_booking(&self, id: u64) -> Result<Booking>;

    /// Store a booking and return it with its assigned id
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking>;
}

/// In-memory store with a fixed number of tables, one booking per table
#[derive(Debug)]
pub struct InMemoryBookings {
    tables: usize,
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    bookings: BTreeMap<u64, Booking>,
}

impl InMemoryBookings {
    pub fn new(tables: usize) -> Self {
        Self {
            tables,
            inner: RwLock::new(Inner {
                next_id: 1,
                bookings: BTreeMap::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.bookings.is_empty()
    }
}

#[async_trait]
impl BookingManagement for InMemoryBookings {
    async fn get_booking(&self, id: u64) -> Result<Booking> {
        self.inner
            .read()
            .await
            .bookings
            .get(&id)
            .cloned()
            .ok_or(BookingError::NotFound { id })
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        let mut inner = self.inner.write().await;

        if inner.bookings.len() >= self.tables {
            tracing::debug!(tables = self.tables, "all tables booked");
            return Err(BookingError::no_free_table());
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let booking = Booking {
            id,
            number_of_seats: booking.number_of_seats,
            description: booking.description,
            email: booking.email,
        };
        inner.bookings.insert(id, booking.clone());

        tracing::debug!(id, seats = booking.number_of_seats, "booking created");

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_booking(seats: u32) -> NewBooking {
        NewBooking {
            number_of_seats: seats,
            description: None,
            email: "guest@example.com".to_owned(),
        }
    }

    #[tokio::test]
    async fn created_booking_can_be_read_back() {
        let store = InMemoryBookings::new(2);
        let created = store.create_booking(new_booking(4)).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(store.get_booking(1).await.unwrap(), created);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let store = InMemoryBookings::new(3);
        let first = store.create_booking(new_booking(2)).await.unwrap();
        let second = store.create_booking(new_booking(2)).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
    }

    #[tokio::test]
    async fn missing_booking_is_not_found() {
        let store = InMemoryBookings::new(1);
        let err = store.get_booking(404).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound { id: 404 }));
    }

    #[tokio::test]
    async fn full_restaurant_is_over_booked() {
        let store = InMemoryBookings::new(1);
        store.create_booking(new_booking(2)).await.unwrap();

        let err = store.create_booking(new_booking(2)).await.unwrap_err();
        assert!(matches!(err, BookingError::OverBooked(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn no_tables_means_always_over_booked() {
        let store = InMemoryBookings::new(0);
        assert!(store.create_booking(new_booking(1)).await.is_err());
        assert!(store.is_empty().await);
    }
}
