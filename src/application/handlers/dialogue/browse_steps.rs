//! Criteria steps: budget, body type and brand.
//!
//! Budget and type answers first go through the slot extractor so a single
//! sentence can fill several criteria; strict option validation runs after.
//! Once every criterion is set the first results page is shown.

use tracing::{debug, info};

use crate::domain::browse::{
    normalize_type, BudgetBucket, Criterion, ExtractedSlots, FilterCriteria, Preference,
    CANONICAL_TYPES,
};
use crate::domain::dialogue::vocabulary::{ALL_BRAND, ALL_TYPE};
use crate::domain::dialogue::{ResponsePayload, Session, Step};
use crate::ports::validation_error_message;

use super::controller::DialogueController;
use super::errors::DialogueError;

pub(super) const DIFFERENT_CAR: &str =
    "No problem! Let's find you a different car. What's your budget range?";
pub(super) const WELCOME_BACK: &str =
    "Welcome! Let's find your perfect car. What's your budget range?";

/// What led to the next criteria prompt; selects its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Lead {
    Start,
    BudgetChosen,
    TypeChosen,
    BrandChosen,
    /// Criteria were just cleared; carries the budget prompt text.
    Restart(&'static str),
}

impl DialogueController {
    pub(super) async fn browse_start(
        &self,
        session: &mut Session,
    ) -> Result<ResponsePayload, DialogueError> {
        self.prompt_next(session, Lead::Start).await
    }

    pub(super) async fn browse_budget(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        let slots = self.extract_slots(message).await;
        let merged = session.criteria.merge_slots(&slots);
        if merged.brand || merged.car_type {
            debug!(brand = ?session.criteria.brand, car_type = ?session.criteria.car_type, "Captured criteria at budget step");
        }

        if merged.budget {
            info!(budget = ?session.criteria.budget, "Budget inferred from free text");
            return self.prompt_next(session, Lead::BudgetChosen).await;
        }

        let options = BudgetBucket::option_labels();

        if slots.normalized_brand().is_some() || slots.normalized_type().is_some() {
            return Ok(ResponsePayload::with_options(
                noted_without_budget(&session.criteria),
                options,
            ));
        }

        let outcome = self.validator.validate(message, &options);
        match outcome.accepted().and_then(BudgetBucket::from_label) {
            Some(bucket) => {
                info!(budget = %bucket, "Budget selected");
                session.criteria.budget = Some(bucket);
                self.prompt_next(session, Lead::BudgetChosen).await
            }
            None => Ok(ResponsePayload::with_options(
                validation_error_message("budget range", &outcome.suggestions, &options),
                options,
            )),
        }
    }

    pub(super) async fn browse_type(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        let Some(budget) = session.criteria.budget else {
            return self.prompt_next(session, Lead::Start).await;
        };

        let slots = self.extract_slots(message).await;
        let brand_only = ExtractedSlots {
            brand: slots.brand.clone(),
            ..ExtractedSlots::default()
        };
        if session.criteria.merge_slots(&brand_only).brand {
            debug!(brand = ?session.criteria.brand, "Captured brand at type step");
        }

        let offered = self.type_options(budget).await?;

        let candidate = match slots.normalized_type() {
            Some(car_type) => car_type,
            None if slots.normalized_brand().is_some() => {
                let brand = session
                    .criteria
                    .brand
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                return Ok(ResponsePayload::with_options(
                    format!("Noted your brand {}. What type of car do you prefer?", brand),
                    offered,
                ));
            }
            None => message.trim().to_string(),
        };

        let outcome = self
            .validator
            .validate(&candidate, &type_vocabulary(&offered));
        let Some(matched) = outcome.accepted() else {
            return Ok(ResponsePayload::with_options(
                validation_error_message("car type", &outcome.suggestions, &offered),
                offered,
            ));
        };

        let car_type = if matched.eq_ignore_ascii_case(ALL_TYPE) {
            Preference::Any
        } else {
            Preference::Only(normalize_type(matched).unwrap_or_else(|| matched.to_string()))
        };
        info!(car_type = %car_type, "Car type selected");
        session.criteria.car_type = Some(car_type);

        self.prompt_next(session, Lead::TypeChosen).await
    }

    pub(super) async fn browse_brand(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<ResponsePayload, DialogueError> {
        let (Some(budget), Some(car_type)) =
            (session.criteria.budget, session.criteria.car_type.clone())
        else {
            return self.prompt_next(session, Lead::Start).await;
        };

        let offered = self.brand_options(budget, &car_type).await?;
        let outcome = self.validator.validate(message, &offered);
        let Some(matched) = outcome.accepted() else {
            return Ok(ResponsePayload::with_options(
                validation_error_message("brand", &outcome.suggestions, &offered),
                offered,
            ));
        };

        let brand = if matched.eq_ignore_ascii_case(ALL_BRAND) {
            Preference::Any
        } else {
            Preference::Only(matched.to_string())
        };
        info!(brand = %brand, "Brand selected");
        session.criteria.brand = Some(brand);

        self.prompt_next(session, Lead::BrandChosen).await
    }

    /// Prompts for the first missing criterion, or shows results when none
    /// is missing. The session moves to the step of whatever is shown.
    pub(super) async fn prompt_next(
        &self,
        session: &mut Session,
        lead: Lead,
    ) -> Result<ResponsePayload, DialogueError> {
        let criteria = session.criteria.clone();
        if let Some(resolved) = criteria.resolved() {
            return self.show_results(session, resolved, lead).await;
        }

        let (criterion, budget, options) =
            match (criteria.first_missing(), criteria.budget, criteria.car_type) {
                (Some(Criterion::CarType), Some(budget), _) => {
                    (Criterion::CarType, Some(budget), self.type_options(budget).await?)
                }
                (Some(Criterion::Brand), Some(budget), Some(car_type)) => (
                    Criterion::Brand,
                    Some(budget),
                    self.brand_options(budget, &car_type).await?,
                ),
                _ => (Criterion::Budget, None, BudgetBucket::option_labels()),
            };

        session.move_to(prompt_step(criterion))?;
        Ok(ResponsePayload::with_options(
            prompt_text(lead, criterion, budget),
            options,
        ))
    }

    /// `all Type` followed by the body types in stock for `budget`.
    async fn type_options(&self, budget: BudgetBucket) -> Result<Vec<String>, DialogueError> {
        let types = self.query(self.inventory.available_types(budget)).await?;
        Ok(std::iter::once(ALL_TYPE.to_string()).chain(types).collect())
    }

    /// `all Brand` followed by the brands in stock for `budget` and `car_type`.
    async fn brand_options(
        &self,
        budget: BudgetBucket,
        car_type: &Preference,
    ) -> Result<Vec<String>, DialogueError> {
        let brands = self
            .query(self.inventory.available_brands(budget, car_type))
            .await?;
        Ok(std::iter::once(ALL_BRAND.to_string()).chain(brands).collect())
    }
}

fn prompt_step(criterion: Criterion) -> Step {
    match criterion {
        Criterion::Budget => Step::BrowseBudget,
        Criterion::CarType => Step::BrowseType,
        Criterion::Brand => Step::BrowseBrand,
    }
}

/// Offered type options plus the canonical vocabulary, without duplicates.
fn type_vocabulary(offered: &[String]) -> Vec<String> {
    let mut vocabulary = offered.to_vec();
    for canonical in CANONICAL_TYPES {
        if !vocabulary.iter().any(|v| v.eq_ignore_ascii_case(canonical)) {
            vocabulary.push(canonical.to_string());
        }
    }
    vocabulary
}

/// Acknowledges criteria captured from free text before a budget is known.
fn noted_without_budget(criteria: &FilterCriteria) -> String {
    let mut noted = Vec::new();
    if let Some(brand) = &criteria.brand {
        noted.push(format!("brand {}", brand));
    }
    if let Some(car_type) = &criteria.car_type {
        noted.push(format!("type {}", car_type));
    }
    format!("Noted {}. What's your budget range?", noted.join(" and "))
}

fn prompt_text(lead: Lead, missing: Criterion, budget: Option<BudgetBucket>) -> String {
    let budget = budget.map(|b| b.label()).unwrap_or_default();
    match (lead, missing) {
        (Lead::Start, Criterion::Budget) => {
            "Great! We'll help you find cars. First, what's your budget range?".to_string()
        }
        (Lead::Start, Criterion::CarType) => {
            format!("Noted your budget ({}). What type of car do you prefer?", budget)
        }
        (Lead::Start, Criterion::Brand) => "Got it. Any preferred brand?".to_string(),
        (Lead::BudgetChosen, Criterion::CarType) => format!(
            "Perfect! {} gives you excellent options. What type of car do you prefer?",
            budget
        ),
        (Lead::BudgetChosen, Criterion::Brand) => format!(
            "Perfect! {} gives you excellent options. Any preferred brand?",
            budget
        ),
        (Lead::TypeChosen, Criterion::Brand) => {
            "Excellent choice! Which brand do you prefer?".to_string()
        }
        (Lead::Restart(text), Criterion::Budget) => text.to_string(),
        (_, Criterion::Budget) => "What's your budget range?".to_string(),
        (_, Criterion::CarType) => "What type of car do you prefer?".to_string(),
        (_, Criterion::Brand) => "Which brand do you prefer?".to_string(),
    }
}
