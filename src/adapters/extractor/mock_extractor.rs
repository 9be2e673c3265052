//! Mock Slot Extractor for testing.
//!
//! Provides a scripted implementation of the SlotExtractor port so tests
//! can drive the dialogue without a real extractor.
//!
//! # Features
//!
//! - Queued results, consumed in order
//! - Simulated delays for timeout testing
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let extractor = MockSlotExtractor::new()
//!     .with_slots(ExtractedSlots { brand: Some("kia".into()), ..Default::default() })
//!     .with_error(SlotExtractionError::RateLimited)
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::browse::ExtractedSlots;
use crate::ports::{SlotExtractionError, SlotExtractor};

/// Scripted slot extractor.
///
/// Once the queue is exhausted every call yields empty slots.
#[derive(Debug, Clone, Default)]
pub struct MockSlotExtractor {
    results: Arc<Mutex<VecDeque<Result<ExtractedSlots, SlotExtractionError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSlotExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful extraction.
    pub fn with_slots(self, slots: ExtractedSlots) -> Self {
        self.push(Ok(slots));
        self
    }

    /// Queues a failed extraction.
    pub fn with_error(self, error: SlotExtractionError) -> Self {
        self.push(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of extract calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Texts passed to extract, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, result: Result<ExtractedSlots, SlotExtractionError>) {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }

    fn next_result(&self) -> Result<ExtractedSlots, SlotExtractionError> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(ExtractedSlots::default()))
    }
}

#[async_trait]
impl SlotExtractor for MockSlotExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractedSlots, SlotExtractionError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_result()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
