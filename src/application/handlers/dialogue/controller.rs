//! DialogueController - Step-indexed state machine over a [`Session`].
//!
//! Each call consumes one user message, mutates the session in place and
//! returns what to send back. A greeting resets the session from any step;
//! otherwise the message is dispatched to the handler for the persisted
//! step. Step handlers live in sibling modules:
//!
//! - `browse_steps` - criteria prompts and result fetching
//! - `results_steps` - paging and car selection
//! - `booking_steps` - test-drive draft, confirmation and wrap-up

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::browse::ExtractedSlots;
use crate::domain::dialogue::vocabulary::{self, MAIN_MENU, START_AGAIN};
use crate::domain::dialogue::{DialogueSettings, ResponsePayload, Session, Step};
use crate::domain::foundation::ConversationKey;
use crate::ports::{
    BookingStore, Calendar, InputValidator, InventoryError, InventoryQuery, SlotExtractor,
};

use super::errors::DialogueError;

const RESTART_MESSAGE: &str = "Something went wrong. Let's start again.";

/// Drives one conversation turn at a time.
///
/// Holds no per-conversation state; the caller owns the [`Session`] and is
/// responsible for serializing turns of the same conversation.
pub struct DialogueController {
    pub(super) inventory: Arc<dyn InventoryQuery>,
    pub(super) extractor: Arc<dyn SlotExtractor>,
    pub(super) validator: Arc<dyn InputValidator>,
    pub(super) calendar: Arc<dyn Calendar>,
    pub(super) bookings: Arc<dyn BookingStore>,
    pub(super) settings: DialogueSettings,
}

impl DialogueController {
    pub fn new(
        inventory: Arc<dyn InventoryQuery>,
        extractor: Arc<dyn SlotExtractor>,
        validator: Arc<dyn InputValidator>,
        calendar: Arc<dyn Calendar>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            inventory,
            extractor,
            validator,
            calendar,
            bookings,
            settings: DialogueSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DialogueSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &DialogueSettings {
        &self.settings
    }

    /// Applies one user message to `session`.
    ///
    /// `Ok(None)` means "send nothing". On `Err` the session may be partly
    /// mutated and must be discarded by the caller.
    pub async fn advance(
        &self,
        session: &mut Session,
        key: &ConversationKey,
        message: &str,
    ) -> Result<Option<ResponsePayload>, DialogueError> {
        if vocabulary::is_greeting(message) {
            info!(conversation = %key, from = %session.step, "Greeting received, resetting session");
            session.reset();
            return Ok(Some(ResponsePayload::with_options(
                self.settings.menu_greeting(),
                MAIN_MENU,
            )));
        }

        let step = session.step;
        debug!(conversation = %key, step = %step, "Dispatching message");

        let response = match step {
            Step::BrowseStart => self.browse_start(session).await?,
            Step::BrowseBudget => self.browse_budget(session, message).await?,
            Step::BrowseType => self.browse_type(session, message).await?,
            Step::BrowseBrand => self.browse_brand(session, message).await?,
            Step::ShowMoreCars => self.show_more_cars(session, message).await?,
            Step::CarSelectedOptions => self.car_selected_options(session, message).await?,
            Step::TestDriveDate => self.test_drive_date(session, message)?,
            Step::TestDriveDay => self.test_drive_day(session, message)?,
            Step::TestDriveTime => self.test_drive_time(session, message)?,
            Step::TdName => self.td_name(session, message)?,
            Step::TdPhone => self.td_phone(session, message)?,
            Step::TdLicense => self.td_license(session, message)?,
            Step::TdLocationMode => self.td_location_mode(session, message)?,
            Step::TdHomeAddress | Step::TdDropLocation => {
                self.td_address(session, message, step)?
            }
            Step::TestDriveConfirmation => {
                self.test_drive_confirmation(session, key, message).await?
            }
            Step::BookingComplete => return self.booking_complete(session, message).await,
            Step::ChangeCriteriaConfirm => self.change_criteria_confirm(session, message).await?,
            Step::Unrecognized => {
                warn!(conversation = %key, "Unrecognized step, restarting conversation");
                session.reset();
                ResponsePayload::with_options(RESTART_MESSAGE, [START_AGAIN])
            }
        };

        if session.step != step {
            debug!(conversation = %key, from = %step, to = %session.step, "Step changed");
        }

        Ok(Some(response))
    }

    /// Best-effort slot extraction. Failures and timeouts yield no slots.
    pub(super) async fn extract_slots(&self, message: &str) -> ExtractedSlots {
        let extraction = tokio::time::timeout(
            self.settings.extractor_timeout,
            self.extractor.extract(message),
        )
        .await;

        match extraction {
            Ok(Ok(slots)) => {
                if !slots.is_empty() {
                    debug!(extractor = self.extractor.name(), ?slots, "Slots extracted");
                }
                slots
            }
            Ok(Err(e)) => {
                warn!(extractor = self.extractor.name(), error = %e, "Slot extraction failed, using structured input only");
                ExtractedSlots::default()
            }
            Err(_) => {
                warn!(
                    extractor = self.extractor.name(),
                    timeout_ms = self.settings.extractor_timeout.as_millis() as u64,
                    "Slot extraction timed out, using structured input only"
                );
                ExtractedSlots::default()
            }
        }
    }

    /// Runs an inventory query under the configured time bound.
    pub(super) async fn query<T, F>(&self, query: F) -> Result<T, InventoryError>
    where
        F: Future<Output = Result<T, InventoryError>>,
    {
        tokio::time::timeout(self.settings.inventory_timeout, query)
            .await
            .map_err(|_| InventoryError::Timeout)?
    }
}
