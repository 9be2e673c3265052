//! Filter criteria and the slot-merge rules that fill them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget::{BudgetBucket, BudgetRange};

/// Sentinel stored for an unconstrained type or brand.
pub const ANY_SENTINEL: &str = "all";

/// Canonical body types. Extracted types are mapped onto these
/// case-insensitively; anything else is title-cased verbatim.
pub const CANONICAL_TYPES: [&str; 8] = [
    "SUV",
    "Sedan",
    "Hatchback",
    "Coupe",
    "Convertible",
    "Wagon",
    "Pickup",
    "MUV",
];

/// A type or brand choice: either unconstrained or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Preference {
    Any,
    Only(String),
}

impl Preference {
    /// Returns the specific value, or `None` when unconstrained.
    pub fn value(&self) -> Option<&str> {
        match self {
            Preference::Any => None,
            Preference::Only(v) => Some(v.as_str()),
        }
    }

    /// Returns true if `candidate` satisfies this preference.
    pub fn admits(&self, candidate: &str) -> bool {
        match self {
            Preference::Any => true,
            Preference::Only(v) => v.eq_ignore_ascii_case(candidate),
        }
    }
}

impl From<String> for Preference {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(ANY_SENTINEL) {
            Preference::Any
        } else {
            Preference::Only(value)
        }
    }
}

impl From<Preference> for String {
    fn from(value: Preference) -> Self {
        match value {
            Preference::Any => ANY_SENTINEL.to_string(),
            Preference::Only(v) => v,
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preference::Any => f.write_str(ANY_SENTINEL),
            Preference::Only(v) => f.write_str(v),
        }
    }
}

/// Slots recovered from one free-text utterance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedSlots {
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    pub budget: Option<BudgetRange>,
}

impl ExtractedSlots {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.car_type.is_none()
            && !self.budget.is_some_and(|b| b.is_stated())
    }

    /// Normalized type slot, if any.
    pub fn normalized_type(&self) -> Option<String> {
        self.car_type.as_deref().and_then(normalize_type)
    }

    /// Normalized brand slot, if any.
    pub fn normalized_brand(&self) -> Option<String> {
        self.brand.as_deref().and_then(capitalize_brand)
    }

    /// Bucket implied by the budget slot, if it fits exactly one.
    pub fn budget_bucket(&self) -> Option<BudgetBucket> {
        self.budget.filter(|b| b.is_stated()).and_then(|b| b.bucket())
    }
}

/// Which criteria a merge actually filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub brand: bool,
    pub car_type: bool,
    pub budget: bool,
}

/// The first criterion still missing, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Budget,
    CarType,
    Brand,
}

/// Budget bucket, body type and brand collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub budget: Option<BudgetBucket>,
    #[serde(rename = "type")]
    pub car_type: Option<Preference>,
    pub brand: Option<Preference>,
}

/// A complete criteria triple, ready for an inventory query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedCriteria {
    pub budget: BudgetBucket,
    #[serde(rename = "type")]
    pub car_type: Preference,
    pub brand: Preference,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.budget.is_none() && self.car_type.is_none() && self.brand.is_none()
    }

    /// Returns the first criterion still missing, or `None` when complete.
    pub fn first_missing(&self) -> Option<Criterion> {
        if self.budget.is_none() {
            Some(Criterion::Budget)
        } else if self.car_type.is_none() {
            Some(Criterion::CarType)
        } else if self.brand.is_none() {
            Some(Criterion::Brand)
        } else {
            None
        }
    }

    /// Returns the complete triple when every criterion is set.
    pub fn resolved(&self) -> Option<ResolvedCriteria> {
        Some(ResolvedCriteria {
            budget: self.budget?,
            car_type: self.car_type.clone()?,
            brand: self.brand.clone()?,
        })
    }

    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Merges extracted slots without overwriting anything already set.
    ///
    /// Brands are capitalized, types mapped through [`CANONICAL_TYPES`], and
    /// a budget range is kept only if it fits exactly one bucket.
    pub fn merge_slots(&mut self, slots: &ExtractedSlots) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        if self.brand.is_none() {
            if let Some(brand) = slots.normalized_brand() {
                self.brand = Some(Preference::Only(brand));
                outcome.brand = true;
            }
        }

        if self.car_type.is_none() {
            if let Some(car_type) = slots.normalized_type() {
                self.car_type = Some(Preference::Only(car_type));
                outcome.car_type = true;
            }
        }

        if self.budget.is_none() {
            if let Some(bucket) = slots.budget_bucket() {
                self.budget = Some(bucket);
                outcome.budget = true;
            }
        }

        outcome
    }
}

/// First letter upper, remainder lower. Blank input yields `None`.
pub fn capitalize_brand(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect())
}

/// Maps a body type onto the canonical vocabulary, or title-cases it.
pub fn normalize_type(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    CANONICAL_TYPES
        .iter()
        .find(|canonical| canonical.eq_ignore_ascii_case(raw))
        .map(|canonical| canonical.to_string())
        .or_else(|| capitalize_brand(raw))
}
