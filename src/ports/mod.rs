//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `InventoryQuery` - Vehicle stock, body types, brands and photos
//! - `SlotExtractor` - Best-effort criteria recovery from free text
//! - `InputValidator` - Option matching with suggestions
//! - `Calendar` - Date resolution and time-slot options
//! - `BookingStore` - Persistence of confirmed test drives
//!
//! ## Session Ports
//!
//! - `SessionStore` - Per-conversation session persistence

mod booking_store;
mod calendar;
mod input_validator;
mod inventory;
mod session_store;
mod slot_extractor;

pub use booking_store::{BookingStore, BookingStoreError};
pub use calendar::Calendar;
pub use input_validator::{validation_error_message, InputValidator, ValidationOutcome};
pub use inventory::{InventoryError, InventoryQuery};
pub use session_store::{SessionStore, SessionStoreError};
pub use slot_extractor::{SlotExtractionError, SlotExtractor};
