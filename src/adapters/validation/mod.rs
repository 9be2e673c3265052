//! Validation Adapters - Input validator implementations.
//!
//! Contains adapters that match free-text answers against button options.

mod fuzzy_validator;

pub use fuzzy_validator::{FuzzyInputValidator, ACCEPT_THRESHOLD, SUGGEST_THRESHOLD};
