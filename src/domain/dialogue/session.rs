//! Per-conversation session record.

use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingDraft;
use crate::domain::browse::{CarListing, FilterCriteria, ResolvedCriteria};
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::pagination::{page, Page};

use super::step::Step;

/// Snapshot of the inventory matching one criteria triple, plus the
/// paging cursor into it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub cars: Vec<CarListing>,
    /// Always a multiple of the page size and never past `cars.len()`.
    #[serde(default)]
    pub car_index: usize,
    /// Criteria the snapshot was fetched for.
    #[serde(default)]
    pub fetched_for: Option<ResolvedCriteria>,
}

impl ResultSet {
    /// True when a snapshot for exactly these criteria is held.
    pub fn is_fetched_for(&self, criteria: &ResolvedCriteria) -> bool {
        self.fetched_for.as_ref() == Some(criteria)
    }

    /// Replaces the snapshot and rewinds the cursor.
    pub fn replace(&mut self, criteria: ResolvedCriteria, cars: Vec<CarListing>) {
        self.cars = cars;
        self.car_index = 0;
        self.fetched_for = Some(criteria);
    }

    /// Current page at the cursor.
    pub fn current_page(&self, page_size: usize) -> Page<'_> {
        page(&self.cars, self.car_index, page_size)
    }

    /// Moves the cursor one page forward. Leaves it untouched and returns
    /// false when no further page exists.
    pub fn advance(&mut self, page_size: usize) -> bool {
        let current = self.current_page(page_size);
        if !current.has_more {
            return false;
        }
        self.car_index = current.next_index;
        true
    }

    pub fn clear(&mut self) {
        *self = ResultSet::default();
    }
}

/// Everything the dialogue remembers about one conversation.
///
/// Missing fields deserialize to their defaults, so a blank record is a
/// fresh conversation at [`Step::BrowseStart`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub step: Step,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub results: ResultSet,
    /// `"{brand} {model} {variant}"` of the chosen listing.
    #[serde(default)]
    pub selected_car: Option<String>,
    #[serde(default)]
    pub booking: BookingDraft,
    #[serde(default)]
    pub conversation_ended: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cleared record that only remembers the conversation was ended.
    pub fn ended() -> Self {
        Self {
            conversation_ended: true,
            ..Self::default()
        }
    }

    /// Back to a fresh conversation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validated step change.
    pub fn move_to(&mut self, target: Step) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(target)?;
        Ok(())
    }

    /// Drops criteria, results, the selected car and any booking draft.
    pub fn clear_selection(&mut self) {
        self.criteria.clear();
        self.results.clear();
        self.selected_car = None;
        self.booking = BookingDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::browse::fixtures::car;
    use crate::domain::browse::{BudgetBucket, Preference};

    fn criteria() -> ResolvedCriteria {
        ResolvedCriteria {
            budget: BudgetBucket::From5To10Lakh,
            car_type: Preference::Only("SUV".into()),
            brand: Preference::Any,
        }
    }

    fn cars(n: usize) -> Vec<CarListing> {
        (0..n)
            .map(|i| car("Tata", "Nexon", &format!("V{}", i), 700_000 + i as u64))
            .collect()
    }

    mod results {
        use super::*;

        #[test]
        fn advance_moves_by_page_size() {
            let mut results = ResultSet::default();
            results.replace(criteria(), cars(7));

            assert!(results.advance(3));
            assert_eq!(results.car_index, 3);
            assert!(results.advance(3));
            assert_eq!(results.car_index, 6);
            assert!(!results.advance(3));
            assert_eq!(results.car_index, 6);
        }

        #[test]
        fn replace_rewinds_cursor() {
            let mut results = ResultSet::default();
            results.replace(criteria(), cars(5));
            results.advance(3);
            results.replace(criteria(), cars(2));
            assert_eq!(results.car_index, 0);
            assert!(results.is_fetched_for(&criteria()));
        }
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn blank_record_deserializes_to_fresh_session() {
            let session: Session = serde_json::from_str("{}").unwrap();
            assert_eq!(session, Session::new());
            assert_eq!(session.step, Step::BrowseStart);
        }

        #[test]
        fn unknown_step_survives_deserialization() {
            let session: Session = serde_json::from_str(r#"{"step":"main_menu"}"#).unwrap();
            assert_eq!(session.step, Step::Unrecognized);
        }

        #[test]
        fn ended_keeps_only_the_flag() {
            let ended = Session::ended();
            assert!(ended.conversation_ended);
            assert!(ended.criteria.is_empty());
            assert_eq!(ended.selected_car, None);
        }

        #[test]
        fn move_to_rejects_illegal_jumps() {
            let mut session = Session {
                step: Step::TdPhone,
                ..Default::default()
            };
            assert!(session.move_to(Step::ShowMoreCars).is_err());
            assert_eq!(session.step, Step::TdPhone);
            assert!(session.move_to(Step::TdLicense).is_ok());
        }

        #[test]
        fn clear_selection_keeps_step() {
            let mut session = Session {
                step: Step::BookingComplete,
                selected_car: Some("Kia Seltos HTX".into()),
                ..Default::default()
            };
            session.criteria.budget = Some(BudgetBucket::Above20Lakh);
            session.results.replace(criteria(), cars(2));

            session.clear_selection();

            assert_eq!(session.step, Step::BookingComplete);
            assert!(session.criteria.is_empty());
            assert!(session.results.cars.is_empty());
            assert_eq!(session.selected_car, None);
        }
    }
}
