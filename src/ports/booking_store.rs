//! Booking Store Port - Persists confirmed test drives.

use async_trait::async_trait;

use crate::domain::booking::Booking;

/// Errors that can occur while committing a booking
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Booking store unavailable: {0}")]
    Unavailable(String),

    #[error("Booking commit timed out")]
    Timeout,
}

/// Port for persisting confirmed bookings
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn commit(&self, booking: &Booking) -> Result<(), BookingStoreError>;
}
