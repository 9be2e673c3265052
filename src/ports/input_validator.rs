//! Input Validator Port - Matches raw input against a fixed option set.

/// Result of validating one input against an option set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// The option the input resolved to, spelled as in the option set.
    pub matched_option: Option<String>,
    /// Closest options, best first, when the input did not resolve.
    pub suggestions: Vec<String>,
}

impl ValidationOutcome {
    pub fn matched(option: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            matched_option: Some(option.into()),
            suggestions: Vec::new(),
        }
    }

    pub fn invalid(suggestions: Vec<String>) -> Self {
        Self {
            is_valid: false,
            matched_option: None,
            suggestions,
        }
    }

    /// The matched option when valid.
    pub fn accepted(&self) -> Option<&str> {
        if self.is_valid {
            self.matched_option.as_deref()
        } else {
            None
        }
    }
}

/// Port for validating user input against known options
pub trait InputValidator: Send + Sync {
    fn validate(&self, input: &str, options: &[String]) -> ValidationOutcome;
}

/// Re-prompt text shown after an input failed validation.
pub fn validation_error_message(field: &str, suggestions: &[String], options: &[String]) -> String {
    let mut message = format!("Sorry, I couldn't recognize that {}.", field);
    if !suggestions.is_empty() {
        message.push_str(&format!(" Did you mean: {}?", suggestions.join(", ")));
    }
    if options.is_empty() {
        message.push_str(" Please try again.");
    } else {
        message.push_str(" Please choose one of the options below:");
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_only_when_valid() {
        assert_eq!(ValidationOutcome::matched("SUV").accepted(), Some("SUV"));
        assert_eq!(ValidationOutcome::invalid(vec!["SUV".into()]).accepted(), None);
    }

    #[test]
    fn message_lists_suggestions() {
        let text = validation_error_message(
            "car type",
            &["SUV".to_string(), "Sedan".to_string()],
            &["all Type".to_string()],
        );
        assert_eq!(
            text,
            "Sorry, I couldn't recognize that car type. Did you mean: SUV, Sedan? Please choose one of the options below:"
        );
    }

    #[test]
    fn message_without_suggestions() {
        let text = validation_error_message("budget range", &[], &["Under ₹5 Lakhs".to_string()]);
        assert_eq!(
            text,
            "Sorry, I couldn't recognize that budget range. Please choose one of the options below:"
        );
    }
}
