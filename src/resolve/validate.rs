//! Candidate validator: the admissibility gate shared by every extraction
//! path. Pure function of the candidate string and the caller's limits.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{PipelineConfig, ValidationLimits};

/// Words that pattern captures produce constantly but are never companies.
const FALSE_POSITIVES: &[&str] = &[
    "thank", "thanks", "your", "our", "the", "this", "that", "with", "from",
    "application", "position", "role", "job", "opportunity", "interview",
    "team", "hiring", "recruiting", "talent", "employment", "career",
    "dear", "hello", "hi", "regards", "best", "sincerely",
    "email", "message", "notification", "update", "reminder", "confirmation",
    "looking", "seeking", "excited", "pleased", "happy", "interested",
    "received", "sent", "time", "work", "new", "great",
];

static RE_LETTER_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]{2}").unwrap());

/// True when `name` is admissible as a company candidate under the given
/// caller-context limits.
pub fn is_valid_candidate(name: &str, limits: &ValidationLimits, config: &PipelineConfig) -> bool {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < limits.min_len || len > limits.max_len {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if FALSE_POSITIVES.contains(&lower.as_str()) {
        return false;
    }
    if let Some(first) = config.user_first_name() {
        if lower == first {
            return false;
        }
    }

    // Needs a run of at least two letters somewhere.
    if !RE_LETTER_RUN.is_match(trimmed) {
        return false;
    }

    // Mostly-punctuation captures are junk.
    let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    (letters as f64) >= (len as f64) * limits.min_alpha_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig {
            user_full_name: "Jordan Avery".to_string(),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_accepts_plain_names() {
        let cfg = config();
        let limits = ValidationLimits::subject();
        assert!(is_valid_candidate("Acme", &limits, &cfg));
        assert!(is_valid_candidate("Pyramid Consulting", &limits, &cfg));
        assert!(is_valid_candidate("AT&T", &limits, &cfg));
    }

    #[test]
    fn test_rejects_length_bounds() {
        let cfg = config();
        let limits = ValidationLimits::general();
        assert!(!is_valid_candidate("A", &limits, &cfg));
        let long = "x".repeat(51);
        assert!(!is_valid_candidate(&long, &limits, &cfg));
        // The subject context is looser
        assert!(is_valid_candidate(&"x".repeat(55), &ValidationLimits::subject(), &cfg));
    }

    #[test]
    fn test_rejects_false_positive_lexicon() {
        let cfg = config();
        let limits = ValidationLimits::subject();
        assert!(!is_valid_candidate("Thank", &limits, &cfg));
        assert!(!is_valid_candidate("opportunity", &limits, &cfg));
        assert!(!is_valid_candidate("TEAM", &limits, &cfg));
    }

    #[test]
    fn test_rejects_user_first_name() {
        let cfg = config();
        let limits = ValidationLimits::subject();
        assert!(!is_valid_candidate("Jordan", &limits, &cfg));
        // Last name is not in the validator lexicon (the artifact filter
        // owns full-name rejection)
        assert!(is_valid_candidate("Avery", &limits, &cfg));
    }

    #[test]
    fn test_requires_letter_run() {
        let cfg = config();
        let limits = ValidationLimits::subject();
        assert!(!is_valid_candidate("a-1-b", &limits, &cfg));
        assert!(!is_valid_candidate("1234", &limits, &cfg));
    }

    #[test]
    fn test_alpha_ratio_per_context() {
        let cfg = config();
        // "ab---" is 2/5 = 40% letters: fails both contexts
        assert!(!is_valid_candidate("ab---", &ValidationLimits::subject(), &cfg));
        // "abc--" is 3/5 = 60%: passes subject (>= 50%), passes general (>= 60%)
        assert!(is_valid_candidate("abc--", &ValidationLimits::subject(), &cfg));
        assert!(is_valid_candidate("abc--", &ValidationLimits::general(), &cfg));
        // "abc---" is 3/6 = 50%: subject only
        assert!(is_valid_candidate("abc---", &ValidationLimits::subject(), &cfg));
        assert!(!is_valid_candidate("abc---", &ValidationLimits::general(), &cfg));
    }
}
