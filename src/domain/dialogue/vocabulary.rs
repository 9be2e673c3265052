//! Fixed button labels and reserved phrases of the dialogue.

/// Phrases that reset the conversation from any step.
pub const GREETINGS: [&str; 9] = [
    "hi", "hello", "hey", "hy", "start", "begin", "restart", "menu", "main",
];

pub const MENU_BROWSE: &str = "🚗 Browse Used Cars";
/// Top-level menu. Any reply to it starts the browse flow, so it only
/// offers that flow.
pub const MAIN_MENU: [&str; 1] = [MENU_BROWSE];

pub const ALL_TYPE: &str = "all Type";
pub const ALL_BRAND: &str = "all Brand";

pub const BOOK_TEST_DRIVE: &str = "Book Test Drive";
pub const CHANGE_MY_CRITERIA: &str = "Change My Criteria";

pub const TODAY: &str = "Today";
pub const TOMORROW: &str = "Tomorrow";
pub const LATER_THIS_WEEK: &str = "Later this Week";
pub const NEXT_WEEK: &str = "Next Week";
pub const DATE_CHOICES: [&str; 4] = [TODAY, TOMORROW, LATER_THIS_WEEK, NEXT_WEEK];

pub const YES: &str = "Yes";
pub const NO: &str = "No";

pub const SHOWROOM_PICKUP: &str = "Showroom pickup";
pub const HOME_PICKUP: &str = "Home pickup";

pub const EXPLORE_MORE: &str = "Explore More";
pub const END_CONVERSATION: &str = "End Conversation";
pub const START_AGAIN: &str = "🏁 Start Again";

/// True when the whole message is a reset phrase.
pub fn is_greeting(message: &str) -> bool {
    let normalized = message.trim().to_lowercase();
    GREETINGS.contains(&normalized.as_str())
}

const AFFIRMATIVE_WORDS: [&str; 8] = ["yes", "y", "yeah", "yep", "ok", "okay", "sure", "proceed"];

/// True when any word of the message is a loose "yes, go ahead".
pub fn is_affirmative(message: &str) -> bool {
    message
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| AFFIRMATIVE_WORDS.contains(&word))
}

/// Case-insensitive comparison against a button label.
pub fn is_label(message: &str, label: &str) -> bool {
    message.trim().eq_ignore_ascii_case(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_match_whole_message_only() {
        assert!(is_greeting("Hi"));
        assert!(is_greeting("  MENU "));
        assert!(!is_greeting("hi there"));
        assert!(!is_greeting("history"));
    }

    #[test]
    fn affirmatives() {
        assert!(is_affirmative("Yes"));
        assert!(is_affirmative("proceed"));
        assert!(is_affirmative("Yes, please proceed!"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yesterday"));
    }

    #[test]
    fn labels_ignore_case_and_padding() {
        assert!(is_label(" browse more cars", "Browse More Cars"));
        assert!(!is_label("browse", "Browse More Cars"));
    }
}
