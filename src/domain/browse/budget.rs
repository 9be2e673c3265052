//! Budget buckets and free-text range bucketing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper edge of the first bucket, in rupees.
const FIVE_LAKH: u64 = 500_000;
const TEN_LAKH: u64 = 1_000_000;
const FIFTEEN_LAKH: u64 = 1_500_000;
const TWENTY_LAKH: u64 = 2_000_000;

/// One of the five fixed budget ranges offered to the user.
///
/// Serialized by its display label so persisted sessions stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBucket {
    #[serde(rename = "Under ₹5 Lakhs")]
    Under5Lakh,
    #[serde(rename = "₹5-10 Lakhs")]
    From5To10Lakh,
    #[serde(rename = "₹10-15 Lakhs")]
    From10To15Lakh,
    #[serde(rename = "₹15-20 Lakhs")]
    From15To20Lakh,
    #[serde(rename = "Above ₹20 Lakhs")]
    Above20Lakh,
}

/// Budget options in the order they are offered.
pub const BUDGET_BUCKETS: [BudgetBucket; 5] = [
    BudgetBucket::Under5Lakh,
    BudgetBucket::From5To10Lakh,
    BudgetBucket::From10To15Lakh,
    BudgetBucket::From15To20Lakh,
    BudgetBucket::Above20Lakh,
];

impl BudgetBucket {
    /// Button label for this bucket.
    pub fn label(&self) -> &'static str {
        match self {
            BudgetBucket::Under5Lakh => "Under ₹5 Lakhs",
            BudgetBucket::From5To10Lakh => "₹5-10 Lakhs",
            BudgetBucket::From10To15Lakh => "₹10-15 Lakhs",
            BudgetBucket::From15To20Lakh => "₹15-20 Lakhs",
            BudgetBucket::Above20Lakh => "Above ₹20 Lakhs",
        }
    }

    /// Parses an exact button label.
    pub fn from_label(label: &str) -> Option<Self> {
        BUDGET_BUCKETS.into_iter().find(|b| b.label() == label.trim())
    }

    /// Listing price bounds as `[min, max)`; `None` max is unbounded.
    pub fn price_bounds(&self) -> (u64, Option<u64>) {
        match self {
            BudgetBucket::Under5Lakh => (0, Some(FIVE_LAKH)),
            BudgetBucket::From5To10Lakh => (FIVE_LAKH, Some(TEN_LAKH)),
            BudgetBucket::From10To15Lakh => (TEN_LAKH, Some(FIFTEEN_LAKH)),
            BudgetBucket::From15To20Lakh => (FIFTEEN_LAKH, Some(TWENTY_LAKH)),
            BudgetBucket::Above20Lakh => (TWENTY_LAKH, None),
        }
    }

    /// Returns true if a listing price falls inside this bucket.
    pub fn contains_price(&self, price: u64) -> bool {
        let (min, max) = self.price_bounds();
        price >= min && max.map_or(true, |max| price < max)
    }

    /// All bucket labels, in offer order.
    pub fn option_labels() -> Vec<String> {
        BUDGET_BUCKETS.iter().map(|b| b.label().to_string()).collect()
    }
}

impl fmt::Display for BudgetBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A budget range recovered from free text, in rupees.
///
/// A missing `min` means zero; a missing `max` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl BudgetRange {
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    /// True when at least one bound was stated.
    pub fn is_stated(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Maps the range to the single bucket that fully contains it.
    ///
    /// Buckets are checked in ascending order. A range straddling two
    /// buckets maps to none.
    pub fn bucket(&self) -> Option<BudgetBucket> {
        let min = self.min.unwrap_or(0);
        match self.max {
            Some(max) if max <= FIVE_LAKH => Some(BudgetBucket::Under5Lakh),
            Some(max) if min >= FIVE_LAKH && max <= TEN_LAKH => Some(BudgetBucket::From5To10Lakh),
            Some(max) if min >= TEN_LAKH && max <= FIFTEEN_LAKH => {
                Some(BudgetBucket::From10To15Lakh)
            }
            Some(max) if min >= FIFTEEN_LAKH && max <= TWENTY_LAKH => {
                Some(BudgetBucket::From15To20Lakh)
            }
            None => Some(BudgetBucket::Above20Lakh),
            Some(_) if min >= TWENTY_LAKH => Some(BudgetBucket::Above20Lakh),
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod labels {
        use super::*;

        #[test]
        fn labels_roundtrip() {
            for bucket in BUDGET_BUCKETS {
                assert_eq!(BudgetBucket::from_label(bucket.label()), Some(bucket));
            }
        }

        #[test]
        fn unknown_label_is_none() {
            assert_eq!(BudgetBucket::from_label("cheap"), None);
        }

        #[test]
        fn serializes_as_label() {
            let json = serde_json::to_string(&BudgetBucket::From5To10Lakh).unwrap();
            assert_eq!(json, "\"₹5-10 Lakhs\"");
        }

        #[test]
        fn option_labels_are_in_ascending_order() {
            assert_eq!(
                BudgetBucket::option_labels(),
                vec![
                    "Under ₹5 Lakhs",
                    "₹5-10 Lakhs",
                    "₹10-15 Lakhs",
                    "₹15-20 Lakhs",
                    "Above ₹20 Lakhs"
                ]
            );
        }
    }

    mod bucketing {
        use super::*;

        #[test]
        fn six_to_nine_lakh_is_second_bucket() {
            let range = BudgetRange::new(Some(600_000), Some(900_000));
            assert_eq!(range.bucket(), Some(BudgetBucket::From5To10Lakh));
        }

        #[test]
        fn range_spanning_two_buckets_matches_none() {
            let range = BudgetRange::new(Some(400_000), Some(900_000));
            assert_eq!(range.bucket(), None);
        }

        #[test]
        fn only_max_under_five_lakh_is_first_bucket() {
            let range = BudgetRange::new(None, Some(450_000));
            assert_eq!(range.bucket(), Some(BudgetBucket::Under5Lakh));
        }

        #[test]
        fn open_ended_range_is_top_bucket() {
            let range = BudgetRange::new(Some(700_000), None);
            assert_eq!(range.bucket(), Some(BudgetBucket::Above20Lakh));
        }

        #[test]
        fn bounds_are_inclusive_on_bucket_edges() {
            assert_eq!(
                BudgetRange::new(Some(1_000_000), Some(1_500_000)).bucket(),
                Some(BudgetBucket::From10To15Lakh)
            );
            assert_eq!(
                BudgetRange::new(Some(2_000_000), Some(3_000_000)).bucket(),
                Some(BudgetBucket::Above20Lakh)
            );
        }

        #[test]
        fn bucket_price_containment() {
            assert!(BudgetBucket::Under5Lakh.contains_price(499_999));
            assert!(!BudgetBucket::Under5Lakh.contains_price(500_000));
            assert!(BudgetBucket::From5To10Lakh.contains_price(500_000));
            assert!(BudgetBucket::Above20Lakh.contains_price(90_000_000));
        }
    }

    proptest! {
        #[test]
        fn any_max_within_five_lakh_is_first_bucket(min in 0u64..=500_000, max in 0u64..=500_000) {
            let range = BudgetRange::new(Some(min), Some(max));
            prop_assert_eq!(range.bucket(), Some(BudgetBucket::Under5Lakh));
        }

        #[test]
        fn bucketing_is_deterministic(min in proptest::option::of(0u64..5_000_000), max in proptest::option::of(0u64..5_000_000)) {
            let range = BudgetRange::new(min, max);
            prop_assert_eq!(range.bucket(), range.bucket());
        }

        #[test]
        fn matched_bucket_contains_both_ends(min in 0u64..4_000_000, span in 0u64..2_000_000) {
            let range = BudgetRange::new(Some(min), Some(min + span));
            if let Some(bucket) = range.bucket() {
                let (low, high) = bucket.price_bounds();
                prop_assert!(bucket == BudgetBucket::Under5Lakh || min >= low);
                if let Some(high) = high {
                    prop_assert!(min + span <= high);
                }
            }
        }
    }
}
