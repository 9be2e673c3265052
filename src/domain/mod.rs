//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `browse` - Budget buckets, filter criteria, slot merging and listings
//! - `pagination` - Result paging and display units
//! - `booking` - Test-drive draft, confirmation text and booking record
//! - `dialogue` - Steps, session record and response payload

pub mod booking;
pub mod browse;
pub mod dialogue;
pub mod foundation;
pub mod pagination;
