//! Inventory Adapters
//!
//! In-memory implementation of the InventoryQuery port. The PostgreSQL
//! implementation lives with the other database adapters.

mod in_memory;

pub use in_memory::{demo_stock, InMemoryInventory};
