//! In-memory booking store.
//!
//! Keeps committed bookings in a shared vector for test assertions and for
//! running the binary without a database.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::booking::Booking;
use crate::ports::{BookingStore, BookingStoreError};

/// In-memory implementation of BookingStore.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingStore {
    bookings: Arc<RwLock<Vec<Booking>>>,
    failure: Arc<RwLock<Option<BookingStoreError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent commit fail (`None` restores service).
    pub async fn set_failure(&self, failure: Option<BookingStoreError>) {
        *self.failure.write().await = failure;
    }

    /// Delays every commit, for timeout tests.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().await = delay;
    }

    // === Test Helpers ===

    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn commit(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        if let Some(delay) = *self.delay.read().await {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failure.read().await.clone() {
            return Err(err);
        }
        self.bookings.write().await.push(booking.clone());
        Ok(())
    }
}
