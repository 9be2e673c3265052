//! Shared wiring for controller unit tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::adapters::booking::InMemoryBookingStore;
use crate::adapters::calendar::SystemCalendar;
use crate::adapters::extractor::MockSlotExtractor;
use crate::adapters::inventory::InMemoryInventory;
use crate::adapters::validation::FuzzyInputValidator;
use crate::domain::browse::ExtractedSlots;
use crate::domain::dialogue::{DialogueSettings, ResponsePayload, Session};
use crate::domain::foundation::ConversationKey;
use crate::ports::SlotExtractionError;

use super::{DialogueController, DialogueError};

pub const KEY: &str = "wa-919800000001";

/// Tuesday.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
}

pub struct Harness {
    pub controller: DialogueController,
    pub inventory: InMemoryInventory,
    pub extractor: MockSlotExtractor,
    pub bookings: InMemoryBookingStore,
}

impl Harness {
    /// Demo stock, a scripted extractor with nothing queued and a calendar
    /// pinned to [`today`].
    pub fn new() -> Self {
        Self::with_extractor(MockSlotExtractor::new())
    }

    pub fn with_extractor(extractor: MockSlotExtractor) -> Self {
        let inventory = InMemoryInventory::with_demo_stock();
        let bookings = InMemoryBookingStore::new();
        let controller = DialogueController::new(
            Arc::new(inventory.clone()),
            Arc::new(extractor.clone()),
            Arc::new(FuzzyInputValidator::new()),
            Arc::new(SystemCalendar::fixed(today())),
            Arc::new(bookings.clone()),
        );
        Self {
            controller,
            inventory,
            extractor,
            bookings,
        }
    }

    pub fn with_slots(slots: ExtractedSlots) -> Self {
        Self::with_extractor(MockSlotExtractor::new().with_slots(slots))
    }

    pub fn with_extractor_error(error: SlotExtractionError) -> Self {
        Self::with_extractor(MockSlotExtractor::new().with_error(error))
    }

    pub fn with_extractor_delay(delay: Duration) -> Self {
        Self::with_extractor(MockSlotExtractor::new().with_delay(delay))
    }

    /// Applies the same bound to every collaborator call.
    pub fn with_timeouts(mut self, limit: Duration) -> Self {
        self.controller = self.controller.with_settings(DialogueSettings {
            extractor_timeout: limit,
            inventory_timeout: limit,
            commit_timeout: limit,
            ..DialogueSettings::default()
        });
        self
    }

    pub async fn advance(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<Option<ResponsePayload>, DialogueError> {
        let key = ConversationKey::new(KEY).unwrap();
        self.controller.advance(session, &key, message).await
    }

    /// Like [`Harness::advance`] but expects a payload.
    pub async fn say(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        self.advance(session, message)
            .await
            .map(|response| response.expect("expected a response payload"))
    }
}
