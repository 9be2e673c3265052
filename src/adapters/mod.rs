//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue to external systems:
//! - `inventory` - In-memory vehicle stock
//! - `postgres` - PostgreSQL inventory and booking store
//! - `booking` - In-memory booking store
//! - `extractor` - Keyword, OpenAI and scripted slot extractors
//! - `validation` - Fuzzy option matching
//! - `calendar` - Test-drive dates in showroom time
//! - `storage` - Session stores (in-memory, YAML files)
//! - `http` - axum transport

pub mod booking;
pub mod calendar;
pub mod extractor;
pub mod http;
pub mod inventory;
pub mod postgres;
pub mod storage;
pub mod validation;
