//! Fuzzy Input Validator - Matches typed answers to button options.
//!
//! Resolution order: exact (case-insensitive), then whole-word
//! containment, then Jaro-Winkler similarity. Anything still unresolved
//! gets the closest options as suggestions.

use crate::ports::{InputValidator, ValidationOutcome};

/// Similarity at or above which an option is accepted outright.
pub const ACCEPT_THRESHOLD: f64 = 0.85;
/// Similarity at or above which an option is suggested.
pub const SUGGEST_THRESHOLD: f64 = 0.6;
const MAX_SUGGESTIONS: usize = 3;
/// Shortest input allowed to match as a fragment of a longer option.
const MIN_FRAGMENT_LEN: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyInputValidator;

impl FuzzyInputValidator {
    pub fn new() -> Self {
        Self
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when `needle` appears in `haystack` as whole words.
fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

impl InputValidator for FuzzyInputValidator {
    fn validate(&self, input: &str, options: &[String]) -> ValidationOutcome {
        let input = normalize(input);
        if input.is_empty() {
            return ValidationOutcome::invalid(Vec::new());
        }

        let normalized: Vec<(String, &String)> =
            options.iter().map(|o| (normalize(o), o)).collect();

        if let Some((_, option)) = normalized.iter().find(|(n, _)| *n == input) {
            return ValidationOutcome::matched(option.as_str());
        }

        let containing: Vec<&String> = normalized
            .iter()
            .filter(|(n, _)| {
                !n.is_empty()
                    && (contains_words(&input, n)
                        || (input.chars().count() >= MIN_FRAGMENT_LEN && n.contains(&input)))
            })
            .map(|(_, o)| *o)
            .collect();
        match containing.as_slice() {
            [only] => return ValidationOutcome::matched(only.as_str()),
            [] => {}
            several => {
                return ValidationOutcome::invalid(
                    several.iter().take(MAX_SUGGESTIONS).map(|o| o.to_string()).collect(),
                )
            }
        }

        let mut scored: Vec<(f64, &String)> = normalized
            .iter()
            .map(|(n, o)| (strsim::jaro_winkler(&input, n), *o))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        if let Some((score, option)) = scored.first() {
            let runner_up = scored.get(1).map_or(0.0, |(s, _)| *s);
            if *score >= ACCEPT_THRESHOLD && *score > runner_up {
                return ValidationOutcome::matched(option.as_str());
            }
        }

        ValidationOutcome::invalid(
            scored
                .into_iter()
                .filter(|(score, _)| *score >= SUGGEST_THRESHOLD)
                .take(MAX_SUGGESTIONS)
                .map(|(_, o)| o.clone())
                .collect(),
        )
    }
}
