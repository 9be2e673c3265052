//! Browse domain module.
//!
//! Budget buckets, filter criteria and the slot-merge rules that let a
//! single free-text message fill several criteria at once.

mod budget;
mod criteria;
mod listing;
mod money;

pub use budget::{BudgetBucket, BudgetRange, BUDGET_BUCKETS};
pub use criteria::{
    capitalize_brand, normalize_type, Criterion, ExtractedSlots, FilterCriteria, MergeOutcome,
    Preference, ResolvedCriteria, ANY_SENTINEL, CANONICAL_TYPES,
};
pub use listing::{CarImage, CarListing, SELECT_TOKEN_PREFIX};
pub use money::format_rupees;

#[cfg(test)]
pub(crate) use listing::fixtures;
