//! Test-drive booking sub-flow: date, time, contact chain, location,
//! confirmation and wrap-up.

use tracing::{debug, error, info};

use crate::domain::booking::{render_confirmation, Booking, TestDriveLocation, CONFIRM, REJECT};
use crate::domain::dialogue::vocabulary::{
    self, END_CONVERSATION, EXPLORE_MORE, HOME_PICKUP, NO, SHOWROOM_PICKUP, YES,
};
use crate::domain::dialogue::{ResponsePayload, Session, Step};
use crate::domain::foundation::ConversationKey;

use super::browse_steps::{Lead, DIFFERENT_CAR, WELCOME_BACK};
use super::controller::DialogueController;
use super::errors::DialogueError;

const BOOKED: &str =
    "Thank you! Your test drive has been confirmed. We'll contact you shortly to finalize the details.";
const KEEPING_SELECTION: &str = "Okay, keeping your current selection intact.";

impl DialogueController {
    pub(super) fn test_drive_date(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        let choice = message.trim();
        session.booking.date_choice = Some(choice.to_string());

        match self.calendar.resolve_date(choice) {
            Some(date) => {
                session.booking.set_actual_date(date);
                session.move_to(Step::TestDriveTime)?;
                Ok(ResponsePayload::with_options(
                    "Perfect! Which time works better for you?",
                    self.calendar.time_slot_options(),
                ))
            }
            None => {
                session.move_to(Step::TestDriveDay)?;
                Ok(ResponsePayload::with_options(
                    "Which day works best for you?",
                    self.calendar.day_options(choice),
                ))
            }
        }
    }

    pub(super) fn test_drive_day(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        let day = message.trim();
        session.booking.day = Some(day.to_string());

        match self
            .calendar
            .resolve_day(day, session.booking.date_choice.as_deref())
        {
            Some(date) => session.booking.set_actual_date(date),
            None => debug!(day, "Day answer did not resolve to a date"),
        }

        session.move_to(Step::TestDriveTime)?;
        Ok(ResponsePayload::with_options(
            "Perfect! What time works best?",
            self.calendar.time_slot_options(),
        ))
    }

    pub(super) fn test_drive_time(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        session.booking.time_slot = Some(message.trim().to_string());
        session.move_to(Step::TdName)?;
        Ok(ResponsePayload::text(
            "Great! I need some details to confirm your booking:\n\n1. Your Name:",
        ))
    }

    pub(super) fn td_name(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        session.booking.name = Some(message.trim().to_string());
        session.move_to(Step::TdPhone)?;
        Ok(ResponsePayload::text("2. Your Phone Number:"))
    }

    pub(super) fn td_phone(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        session.booking.phone = Some(message.trim().to_string());
        session.move_to(Step::TdLicense)?;
        Ok(ResponsePayload::with_options(
            "3. Do you have a valid driving license?",
            [YES, NO],
        ))
    }

    pub(super) fn td_license(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        session.booking.license = Some(message.trim().to_string());
        session.move_to(Step::TdLocationMode)?;
        Ok(ResponsePayload::with_options(
            "Thank you! Where would you like to take the test drive?",
            [SHOWROOM_PICKUP, HOME_PICKUP],
        ))
    }

    pub(super) fn td_location_mode(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        let location = TestDriveLocation::from_mode(message);
        let wants_address = matches!(location, TestDriveLocation::HomePickup { .. });
        session.booking.location = Some(location);

        if wants_address {
            session.move_to(Step::TdHomeAddress)?;
            return Ok(ResponsePayload::text(
                "Please share your current address for the test drive:",
            ));
        }

        session.move_to(Step::TestDriveConfirmation)?;
        Ok(self.confirmation(session))
    }

    /// Address answer for either address-taking step. A location mode that
    /// takes no address is replaced by the one the step asked for.
    pub(super) fn td_address(
        &self,
        session: &mut Session,
        message: &str,
        step: Step,
    ) -> Result<ResponsePayload, DialogueError> {
        if !session.booking.set_address(message) {
            let answer = Some(message.trim().to_string());
            session.booking.location = Some(match step {
                Step::TdDropLocation => TestDriveLocation::Delivery {
                    drop_location: answer,
                },
                _ => TestDriveLocation::HomePickup { address: answer },
            });
        }

        session.move_to(Step::TestDriveConfirmation)?;
        Ok(self.confirmation(session))
    }

    pub(super) async fn test_drive_confirmation(
        &self,
        session: &mut Session,
        key: &ConversationKey,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        if vocabulary::is_label(message, CONFIRM) {
            match Booking::from_draft(
                key.clone(),
                session.selected_car.as_deref(),
                &session.booking,
            ) {
                Ok(booking) => self.commit(&booking).await,
                Err(e) => error!(
                    conversation = %key,
                    error = %e,
                    "Booking draft incomplete, nothing persisted"
                ),
            }

            session.move_to(Step::BookingComplete)?;
            return Ok(ResponsePayload::with_options(
                BOOKED,
                [EXPLORE_MORE, END_CONVERSATION],
            ));
        }

        if vocabulary::is_label(message, REJECT) {
            info!(conversation = %key, "Booking rejected, restarting search");
            session.clear_selection();
            return self.prompt_next(session, Lead::Restart(DIFFERENT_CAR)).await;
        }

        Ok(self.confirmation(session))
    }

    pub(super) async fn booking_complete(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<Option<ResponsePayload>, DialogueError> {
        if vocabulary::is_label(message, EXPLORE_MORE) {
            session.clear_selection();
            return self
                .prompt_next(session, Lead::Restart(WELCOME_BACK))
                .await
                .map(Some);
        }

        if vocabulary::is_label(message, END_CONVERSATION) {
            info!("Conversation ended by user");
            *session = Session::ended();
            return Ok(None);
        }

        Ok(Some(ResponsePayload::with_options(
            "Please select an option:",
            [EXPLORE_MORE, END_CONVERSATION],
        )))
    }

    pub(super) async fn change_criteria_confirm(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        if vocabulary::is_affirmative(message) {
            session.clear_selection();
            return self.prompt_next(session, Lead::Restart(DIFFERENT_CAR)).await;
        }
        Ok(ResponsePayload::text(KEEPING_SELECTION))
    }

    fn confirmation(&self, session: &Session) -> ResponsePayload {
        ResponsePayload::with_options(
            render_confirmation(
                session.selected_car.as_deref(),
                &session.booking,
                &self.settings.showroom,
            ),
            [CONFIRM, REJECT],
        )
    }

    /// Best-effort persistence. The customer sees success either way.
    async fn commit(&self, booking: &Booking) {
        match tokio::time::timeout(self.settings.commit_timeout, self.bookings.commit(booking)).await
        {
            Ok(Ok(())) => info!(
                booking_id = %booking.id,
                conversation = %booking.conversation,
                car = %booking.car,
                "Test drive booked"
            ),
            Ok(Err(e)) => error!(
                booking_id = %booking.id,
                conversation = %booking.conversation,
                error = %e,
                "Failed to persist test drive booking"
            ),
            Err(_) => error!(
                booking_id = %booking.id,
                conversation = %booking.conversation,
                timeout_ms = self.settings.commit_timeout.as_millis() as u64,
                "Timed out persisting test drive booking"
            ),
        }
    }
}
