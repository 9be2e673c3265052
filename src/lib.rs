//! Test Drive Sherpa - Conversational used-car browsing and test-drive booking
//!
//! This crate implements a step-indexed dialogue that narrows vehicle stock
//! by budget, body type and brand, pages through matching listings and
//! books a test drive, one user message at a time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
