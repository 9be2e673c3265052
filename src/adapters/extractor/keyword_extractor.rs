//! Keyword Slot Extractor - Rule-based criteria recovery.
//!
//! Recognizes brand names from a known vocabulary, body types with their
//! common synonyms, and budget phrases such as "under 5 lakhs",
//! "between 6 and 9 lakh", "above 20 lakhs", "15L" or "1.2 crore".
//!
//! Never fails: text naming nothing yields empty slots.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::browse::{BudgetRange, ExtractedSlots};
use crate::ports::{SlotExtractionError, SlotExtractor};

/// Brands recognized when no custom list is given.
pub const DEFAULT_BRANDS: [&str; 18] = [
    "hyundai",
    "maruti",
    "suzuki",
    "tata",
    "mahindra",
    "kia",
    "honda",
    "toyota",
    "renault",
    "nissan",
    "skoda",
    "volkswagen",
    "ford",
    "mg",
    "jeep",
    "bmw",
    "audi",
    "mercedes",
];

/// Body-type synonyms and the type each one names.
const TYPE_SYNONYMS: [(&str, &str); 17] = [
    ("suv", "suv"),
    ("suvs", "suv"),
    ("sedan", "sedan"),
    ("sedans", "sedan"),
    ("hatchback", "hatchback"),
    ("hatchbacks", "hatchback"),
    ("hatch", "hatchback"),
    ("coupe", "coupe"),
    ("coupes", "coupe"),
    ("convertible", "convertible"),
    ("convertibles", "convertible"),
    ("wagon", "wagon"),
    ("estate", "wagon"),
    ("pickup", "pickup"),
    ("truck", "pickup"),
    ("muv", "muv"),
    ("mpv", "muv"),
];

const NUM: &str = r"(\d[\d,]*(?:\.\d+)?)";
const UNIT: &str = r"(lakhs?|lacs?|l|crores?|cr|k|thousand)?\b";
const CURRENCY: &str = r"(?:₹|rs\.?|inr)?\s*";

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:between|from)?\s*{c}{n}\s*{u}\s*(?:-|–|to|and)\s*{c}{n}\s*{u}",
        c = CURRENCY,
        n = NUM,
        u = UNIT
    ))
    .expect("range pattern is valid")
});

static UPPER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:under|below|less than|upto|up to|within|max(?:imum)?|not more than)\s*{c}{n}\s*{u}",
        c = CURRENCY,
        n = NUM,
        u = UNIT
    ))
    .expect("upper-bound pattern is valid")
});

static LOWER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:above|over|more than|at least|atleast|min(?:imum)?|starting(?: from)?)\s*{c}{n}\s*{u}",
        c = CURRENCY,
        n = NUM,
        u = UNIT
    ))
    .expect("lower-bound pattern is valid")
});

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i){c}{n}\s*(lakhs?|lacs?|l|crores?|cr|k|thousand)\b",
        c = CURRENCY,
        n = NUM
    ))
    .expect("amount pattern is valid")
});

/// Rule-based extractor; the default when no LLM is configured.
#[derive(Debug, Clone)]
pub struct KeywordSlotExtractor {
    brands: Vec<String>,
}

impl Default for KeywordSlotExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordSlotExtractor {
    pub fn new() -> Self {
        Self::with_brands(DEFAULT_BRANDS)
    }

    /// Uses a custom brand vocabulary, e.g. the brands in stock.
    pub fn with_brands<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            brands: brands
                .into_iter()
                .map(|b| b.as_ref().trim().to_lowercase())
                .filter(|b| !b.is_empty())
                .collect(),
        }
    }

    /// Runs all three recognizers over `text`.
    pub fn extract_slots(&self, text: &str) -> ExtractedSlots {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        ExtractedSlots {
            brand: self.extract_brand(&tokens),
            car_type: extract_type(&tokens),
            budget: extract_budget(&lower),
        }
    }

    fn extract_brand(&self, tokens: &[&str]) -> Option<String> {
        tokens
            .iter()
            .find(|token| self.brands.iter().any(|brand| brand == *token))
            .map(|token| token.to_string())
    }
}

fn extract_type(tokens: &[&str]) -> Option<String> {
    tokens.iter().find_map(|token| {
        TYPE_SYNONYMS
            .iter()
            .find(|(synonym, _)| synonym == token)
            .map(|(_, canonical)| canonical.to_string())
    })
}

fn extract_budget(text: &str) -> Option<BudgetRange> {
    if let Some(caps) = RANGE_RE.captures(text) {
        // A unit written once applies to both ends: "between 6 and 9 lakh".
        let unit = caps.get(2).or_else(|| caps.get(4)).map(|m| m.as_str());
        let min = amount(&caps, 1, caps.get(2).map(|m| m.as_str()).or(unit));
        let max = amount(&caps, 3, caps.get(4).map(|m| m.as_str()).or(unit));
        if min.is_some() || max.is_some() {
            return Some(BudgetRange::new(min, max));
        }
    }

    if let Some(caps) = UPPER_RE.captures(text) {
        if let Some(max) = amount(&caps, 1, caps.get(2).map(|m| m.as_str())) {
            return Some(BudgetRange::new(None, Some(max)));
        }
    }

    if let Some(caps) = LOWER_RE.captures(text) {
        if let Some(min) = amount(&caps, 1, caps.get(2).map(|m| m.as_str())) {
            return Some(BudgetRange::new(Some(min), None));
        }
    }

    AMOUNT_RE.captures(text).and_then(|caps| {
        amount(&caps, 1, caps.get(2).map(|m| m.as_str())).map(|v| BudgetRange::new(Some(v), Some(v)))
    })
}

/// Rupee value of capture `index` scaled by `unit`. A bare number is only
/// taken as rupees when it is large enough to be a price.
fn amount(caps: &Captures<'_>, index: usize, unit: Option<&str>) -> Option<u64> {
    let raw = caps.get(index)?.as_str().replace(',', "");
    let value: f64 = raw.parse().ok()?;

    let multiplier = match unit.map(|u| u.to_lowercase()).as_deref() {
        Some("lakh" | "lakhs" | "lac" | "lacs" | "l") => 100_000.0,
        Some("crore" | "crores" | "cr") => 10_000_000.0,
        Some("k" | "thousand") => 1_000.0,
        _ if value >= 10_000.0 => 1.0,
        _ => return None,
    };

    Some((value * multiplier).round() as u64)
}

#[async_trait]
impl SlotExtractor for KeywordSlotExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractedSlots, SlotExtractionError> {
        Ok(self.extract_slots(text))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
