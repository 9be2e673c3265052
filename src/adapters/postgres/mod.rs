//! PostgreSQL adapters - Database implementations for collaborator ports.
//!
//! - `PostgresInventory` - Vehicle stock and photo queries
//! - `PostgresBookingStore` - Confirmed test-drive persistence

mod booking_store;
mod inventory;

pub use booking_store::PostgresBookingStore;
pub use inventory::PostgresInventory;
