//! Result paging and car selection.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::browse::{CarListing, ResolvedCriteria, SELECT_TOKEN_PREFIX};
use crate::domain::dialogue::vocabulary::{
    self, BOOK_TEST_DRIVE, CHANGE_MY_CRITERIA, DATE_CHOICES,
};
use crate::domain::dialogue::{ResponsePayload, Session, Step};
use crate::domain::pagination::{
    compose, ImageAvailability, BROWSE_MORE, CHANGE_CRITERIA, SELECT_TITLE,
};

use super::browse_steps::{Lead, DIFFERENT_CAR};
use super::controller::DialogueController;
use super::errors::DialogueError;

const NO_STOCK_AT_START: &str = "We don't have cars matching your criteria right now.";
const NO_STOCK: &str = "Sorry, no cars found matching your criteria. Let's try different options.";
const NO_MORE_PAGES: &str = "No more cars available. Would you like to change your criteria?";

impl DialogueController {
    /// Fetches listings for `criteria` unless already held, then shows the
    /// page at the cursor.
    pub(super) async fn show_results(
        &self,
        session: &mut Session,
        criteria: ResolvedCriteria,
        lead: Lead,
    ) -> Result<ResponsePayload, DialogueError> {
        if !session.results.is_fetched_for(&criteria) {
            let cars = self.query(self.inventory.filter_cars(&criteria)).await?;
            info!(
                budget = %criteria.budget,
                car_type = %criteria.car_type,
                brand = %criteria.brand,
                matches = cars.len(),
                "Criteria resolved"
            );
            session.results.replace(criteria, cars);
        }

        session.move_to(Step::ShowMoreCars)?;

        if session.results.cars.is_empty() {
            let text = if lead == Lead::Start {
                NO_STOCK_AT_START
            } else {
                NO_STOCK
            };
            return Ok(ResponsePayload::with_options(text, [CHANGE_CRITERIA]));
        }

        Ok(self.render_page(session).await)
    }

    pub(super) async fn show_more_cars(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        let message = message.trim();

        if message.starts_with(SELECT_TOKEN_PREFIX) {
            let chosen = session
                .results
                .cars
                .iter()
                .find(|car| car.select_token() == message)
                .map(CarListing::display_name);
            match chosen {
                Some(name) => return select_car(session, name),
                None => debug!(token = message, "Select token matched no listing"),
            }
        }

        if message == SELECT_TITLE {
            let only = match session.results.current_page(self.settings.page_size).items {
                [only] => Some(only.display_name()),
                _ => None,
            };
            if let Some(name) = only {
                return select_car(session, name);
            }
        }

        if vocabulary::is_label(message, BROWSE_MORE) {
            if !session.results.advance(self.settings.page_size) {
                return Ok(ResponsePayload::with_options(NO_MORE_PAGES, [CHANGE_CRITERIA]));
            }
            return Ok(self.render_page(session).await);
        }

        if vocabulary::is_label(message, CHANGE_CRITERIA)
            || vocabulary::is_label(message, CHANGE_MY_CRITERIA)
        {
            session.clear_selection();
            return self.prompt_next(session, Lead::Restart(DIFFERENT_CAR)).await;
        }

        let selected = legacy_selection(&session.results.cars, message);
        session.selected_car = Some(selected);
        session.move_to(Step::TestDriveDate)?;
        Ok(schedule_prompt(session.selected_car.as_deref()))
    }

    pub(super) async fn car_selected_options(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        if vocabulary::is_label(message, BOOK_TEST_DRIVE) {
            session.move_to(Step::TestDriveDate)?;
            return Ok(schedule_prompt(session.selected_car.as_deref()));
        }

        if vocabulary::is_label(message, CHANGE_MY_CRITERIA)
            || vocabulary::is_label(message, CHANGE_CRITERIA)
        {
            session.clear_selection();
            return self.prompt_next(session, Lead::Restart(DIFFERENT_CAR)).await;
        }

        Ok(ResponsePayload::with_options(
            selection_prompt(session.selected_car.as_deref()),
            [BOOK_TEST_DRIVE, CHANGE_MY_CRITERIA],
        ))
    }

    /// Renders the page at the cursor. Image lookups that fail fall back to
    /// text-only units.
    pub(super) async fn render_page(&self, session: &Session) -> ResponsePayload {
        let page = session.results.current_page(self.settings.page_size);

        let mut images = HashMap::with_capacity(page.items.len());
        for car in page.items {
            let availability = match self
                .query(self.inventory.images_for_car(&car.registration_number))
                .await
            {
                Ok(found) => ImageAvailability::resolve(&found, &self.settings.media_base_url),
                Err(e) => {
                    warn!(registration = %car.registration_number, error = %e, "Image lookup failed, showing text only");
                    ImageAvailability::Missing
                }
            };
            images.insert(car.registration_number.clone(), availability);
        }

        let view = compose(&page, &images);
        debug!(start = page.start, shown = page.items.len(), total = page.total, "Rendered results page");
        ResponsePayload::with_options(view.message, [view.control.label()]).and_messages(view.units)
    }
}

fn select_car(session: &mut Session, name: String) -> Result<ResponsePayload, DialogueError> {
    info!(car = %name, "Car selected");
    session.move_to(Step::CarSelectedOptions)?;
    let response = ResponsePayload::with_options(
        format!(
            "Great choice! You've selected {}. What would you like to do next?",
            name
        ),
        [BOOK_TEST_DRIVE, CHANGE_MY_CRITERIA],
    );
    session.selected_car = Some(name);
    Ok(response)
}

/// Free text at the results step is taken as a car name. A name matching a
/// fetched listing is stored in canonical form; anything else verbatim.
fn legacy_selection(cars: &[CarListing], message: &str) -> String {
    match cars.iter().find(|car| car.matches_name(message)) {
        Some(car) => car.display_name(),
        None => {
            warn!(text = message, "Free-text car selection matches no listing, keeping it verbatim");
            message.to_string()
        }
    }
}

fn selection_prompt(selected_car: Option<&str>) -> String {
    match selected_car {
        Some(car) => format!("You've selected {}. What would you like to do next?", car),
        None => "What would you like to do next?".to_string(),
    }
}

pub(super) fn schedule_prompt(selected_car: Option<&str>) -> ResponsePayload {
    let message = match selected_car {
        Some(car) => format!(
            "Excellent! Let's schedule your {} test drive. When would you prefer?",
            car
        ),
        None => "Excellent! Let's schedule your test drive. When would you prefer?".to_string(),
    };
    ResponsePayload::with_options(message, DATE_CHOICES)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::domain::browse::{BudgetBucket, CarImage, Preference};
    use crate::domain::pagination::DisplayUnit;
    use crate::ports::InventoryError;

    /// Session on the results step holding every 5-10L SUV in stock.
    async fn on_results(harness: &Harness) -> Session {
        let mut session = Session {
            step: Step::BrowseBrand,
            ..Default::default()
        };
        session.criteria.budget = Some(BudgetBucket::From5To10Lakh);
        session.criteria.car_type = Some(Preference::Only("SUV".into()));
        harness.say(&mut session, "all Brand").await.unwrap();
        assert_eq!(session.step, Step::ShowMoreCars);
        session
    }

    async fn add_fourth_suv(harness: &Harness) {
        harness
            .inventory
            .add_car(CarListing {
                brand: "Mahindra".into(),
                model: "XUV300".into(),
                variant: "W8".into(),
                year: 2021,
                fuel_type: "Diesel".into(),
                price: 990_000,
                registration_number: "KA19XY3003".into(),
                car_type: "SUV".into(),
            })
            .await;
    }

    mod paging {
        use super::*;

        #[tokio::test]
        async fn browse_more_shows_the_remainder() {
            let harness = Harness::new();
            add_fourth_suv(&harness).await;
            let mut session = on_results(&harness).await;
            assert_eq!(session.results.cars.len(), 4);

            let response = harness.say(&mut session, "Browse More Cars").await.unwrap();

            assert_eq!(session.results.car_index, 3);
            assert_eq!(response.message, "Showing cars 4-4 of 4:\n\nNo more cars available.");
            assert_eq!(response.option_labels(), ["Change criteria"]);
        }

        #[tokio::test]
        async fn browse_more_past_the_end_keeps_cursor() {
            let harness = Harness::new();
            let mut session = on_results(&harness).await;

            let response = harness.say(&mut session, "Browse More Cars").await.unwrap();

            assert_eq!(response.message, NO_MORE_PAGES);
            assert_eq!(response.option_labels(), ["Change criteria"]);
            assert_eq!(session.results.car_index, 0);
            assert_eq!(session.step, Step::ShowMoreCars);
        }

        #[tokio::test]
        async fn results_are_not_refetched_for_same_criteria() {
            let harness = Harness::new();
            let mut session = on_results(&harness).await;
            add_fourth_suv(&harness).await;

            let criteria = session.criteria.resolved().unwrap();
            harness
                .controller
                .show_results(&mut session, criteria, Lead::BrandChosen)
                .await
                .unwrap();

            assert_eq!(session.results.cars.len(), 3);
        }

        #[tokio::test]
        async fn image_failure_falls_back_to_text() {
            let harness = Harness::new();
            harness
                .inventory
                .set_image_failure(Some(InventoryError::QueryFailed("bad join".into())))
                .await;

            let session = on_results(&harness).await;
            let response = harness.controller.render_page(&session).await;

            let units = response.messages.unwrap();
            assert!(matches!(units[0], DisplayUnit::Text { .. }));
            assert!(!units.iter().any(|u| matches!(u, DisplayUnit::Image { .. })));
        }

        #[tokio::test]
        async fn public_image_becomes_image_unit() {
            let harness = Harness::new();
            harness
                .inventory
                .add_image(
                    "KA51EF3344",
                    CarImage {
                        path: "https://cdn.example.com/nexon.jpg".into(),
                        sequence: Some(1),
                        image_type: Some("front".into()),
                    },
                )
                .await;

            let session = on_results(&harness).await;
            let response = harness.controller.render_page(&session).await;

            let units = response.messages.unwrap();
            assert_eq!(
                units[0],
                DisplayUnit::Image {
                    link: "https://cdn.example.com/nexon.jpg".into(),
                    caption: session.results.cars[0].caption(),
                }
            );
        }
    }

    mod selection {
        use super::*;

        #[tokio::test]
        async fn select_token_picks_that_listing() {
            let harness = Harness::new();
            let mut session = on_results(&harness).await;

            let response = harness
                .say(&mut session, "book_Hyundai_Venue_S_Plus")
                .await
                .unwrap();

            assert_eq!(session.selected_car.as_deref(), Some("Hyundai Venue S Plus"));
            assert_eq!(session.step, Step::CarSelectedOptions);
            assert_eq!(
                response.message,
                "Great choice! You've selected Hyundai Venue S Plus. What would you like to do next?"
            );
            assert_eq!(response.option_labels(), ["Book Test Drive", "Change My Criteria"]);
        }

        #[tokio::test]
        async fn bare_select_needs_a_single_visible_car() {
            let harness = Harness::new();
            let mut session = on_results(&harness).await;

            harness.say(&mut session, "SELECT").await.unwrap();

            // Three cars visible: falls through to the free-text selection.
            assert_eq!(session.step, Step::TestDriveDate);
            assert_eq!(session.selected_car.as_deref(), Some("SELECT"));
        }

        #[tokio::test]
        async fn bare_select_with_one_visible_car() {
            let harness = Harness::new();
            add_fourth_suv(&harness).await;
            let mut session = on_results(&harness).await;
            harness.say(&mut session, "Browse More Cars").await.unwrap();

            harness.say(&mut session, "SELECT").await.unwrap();

            assert_eq!(session.selected_car.as_deref(), Some("Mahindra XUV300 W8"));
            assert_eq!(session.step, Step::CarSelectedOptions);
        }

        #[tokio::test]
        async fn typed_name_uses_canonical_listing_name() {
            let harness = Harness::new();
            let mut session = on_results(&harness).await;

            let response = harness.say(&mut session, "kia sonet htx").await.unwrap();

            assert_eq!(session.selected_car.as_deref(), Some("Kia Sonet HTX"));
            assert_eq!(session.step, Step::TestDriveDate);
            assert_eq!(
                response.message,
                "Excellent! Let's schedule your Kia Sonet HTX test drive. When would you prefer?"
            );
            assert_eq!(response.option_labels(), DATE_CHOICES);
        }

        #[tokio::test]
        async fn change_criteria_clears_everything() {
            let harness = Harness::new();
            let mut session = on_results(&harness).await;

            let response = harness.say(&mut session, "Change criteria").await.unwrap();

            assert_eq!(response.message, DIFFERENT_CAR);
            assert_eq!(session.step, Step::BrowseBudget);
            assert!(session.criteria.is_empty());
            assert!(session.results.cars.is_empty());
        }
    }

    mod selected_options {
        use super::*;

        fn selected() -> Session {
            Session {
                step: Step::CarSelectedOptions,
                selected_car: Some("Tata Nexon XZ Plus".into()),
                ..Default::default()
            }
        }

        #[tokio::test]
        async fn book_test_drive_asks_for_date() {
            let harness = Harness::new();
            let mut session = selected();

            let response = harness.say(&mut session, "Book Test Drive").await.unwrap();

            assert_eq!(session.step, Step::TestDriveDate);
            assert_eq!(
                response.message,
                "Excellent! Let's schedule your Tata Nexon XZ Plus test drive. When would you prefer?"
            );
        }

        #[tokio::test]
        async fn change_my_criteria_restarts_at_budget() {
            let harness = Harness::new();
            let mut session = selected();
            session.criteria.budget = Some(BudgetBucket::From5To10Lakh);

            harness.say(&mut session, "Change My Criteria").await.unwrap();

            assert_eq!(session.step, Step::BrowseBudget);
            assert_eq!(session.selected_car, None);
            assert!(session.criteria.is_empty());
        }

        #[tokio::test]
        async fn unmatched_input_reprompts() {
            let harness = Harness::new();
            let mut session = selected();

            let response = harness.say(&mut session, "maybe later").await.unwrap();

            assert_eq!(session.step, Step::CarSelectedOptions);
            assert_eq!(
                response.message,
                "You've selected Tata Nexon XZ Plus. What would you like to do next?"
            );
            assert_eq!(response.option_labels(), ["Book Test Drive", "Change My Criteria"]);
        }
    }
}
