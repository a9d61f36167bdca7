//! Heuristic spam screening for form submissions.
//!
//! Four cheap signals, any two of which flag a submission. Each signal is
//! weak on its own (legitimate messages contain URLs, short messages have
//! low character diversity), so a single hit never rejects.

use std::collections::HashSet;

/// Keywords that mark a message as likely spam.
const SPAM_KEYWORDS: [&str; 4] = ["viagra", "casino", "lottery", "winner"];

/// Minimum distinct characters expected in a genuine non-empty message.
const MIN_DISTINCT_CHARS: usize = 10;

/// Maximum exclamation marks tolerated before counting as a signal.
const MAX_EXCLAMATIONS: usize = 5;

/// Number of signals required to flag a submission.
const SPAM_THRESHOLD: usize = 2;

/// Count the spam signals present in a message.
pub fn spam_signals(message: &str) -> usize {
    let lower = message.to_lowercase();
    let mut signals = 0;

    // Too repetitive
    if !lower.is_empty() && lower.chars().collect::<HashSet<_>>().len() < MIN_DISTINCT_CHARS {
        signals += 1;
    }

    // Contains raw URLs
    if lower.contains("http://") || lower.contains("https://") {
        signals += 1;
    }

    // Too many exclamation marks
    if message.matches('!').count() > MAX_EXCLAMATIONS {
        signals += 1;
    }

    // Denylisted keywords
    if SPAM_KEYWORDS.iter().any(|word| lower.contains(word)) {
        signals += 1;
    }

    signals
}

/// Whether a message trips the spam threshold.
pub fn is_spam(message: &str) -> bool {
    spam_signals(message) >= SPAM_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_message_passes() {
        assert!(!is_spam(
            "Hello, I would like to learn more about your advertising platform."
        ));
    }

    #[test]
    fn test_empty_message_passes() {
        assert_eq!(spam_signals(""), 0);
    }

    #[test]
    fn test_single_signal_is_not_spam() {
        // URL alone is one signal.
        let msg = "Please check our integration docs at https://example.com for details.";
        assert_eq!(spam_signals(msg), 1);
        assert!(!is_spam(msg));
    }

    #[test]
    fn test_two_signals_are_spam() {
        // URL + keyword.
        let msg = "You are a winner, claim your prize at https://spam.example";
        assert!(spam_signals(msg) >= 2);
        assert!(is_spam(msg));
    }

    #[test]
    fn test_repetitive_shouting_is_spam() {
        // Low diversity + excess exclamation marks.
        let msg = "aaaa!!!!!! aaaa!!!!!!";
        assert!(is_spam(msg));
    }

    #[test]
    fn test_keyword_alone_is_not_spam() {
        let msg = "Our casino-themed marketing campaign needs display advertising placement.";
        assert_eq!(spam_signals(msg), 1);
        assert!(!is_spam(msg));
    }
}
