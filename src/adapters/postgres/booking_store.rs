//! PostgreSQL implementation of BookingStore.
//!
//! Appends confirmed test drives to the `test_drives` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::booking::Booking;
use crate::ports::{BookingStore, BookingStoreError};

/// PostgreSQL implementation of BookingStore.
#[derive(Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn commit(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        let location_mode = booking.location.as_ref().map(|l| l.mode_name().to_string());
        let address = booking
            .location
            .as_ref()
            .and_then(|l| l.address())
            .map(str::to_string);

        sqlx::query(
            r#"
            INSERT INTO test_drives (
                id, user_id, car, datetime, time_slot, name, phone, has_dl,
                location_mode, address, created_at
            ) VALUES ($1, $2, $3, COALESCE($4, NOW()::TIMESTAMP), $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(*booking.id.as_uuid())
        .bind(booking.conversation.as_str())
        .bind(&booking.car)
        .bind(booking.scheduled_at)
        .bind(booking.time_slot.as_deref())
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(booking.has_license)
        .bind(location_mode)
        .bind(address)
        .bind(*booking.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| BookingStoreError::DatabaseError(format!("Failed to insert test drive: {}", e)))?;

        Ok(())
    }
}
