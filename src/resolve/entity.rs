//! Optional organization-entity recognition capability.
//!
//! The recognizer is an injected trait object rather than a global checked
//! for null at each call site: when the capability is absent the pipeline
//! runs with a no-op implementation and only loses extraction yield.

use crate::text::truncate_chars;

/// General-purpose organization-entity recognition over free text.
pub trait OrgRecognizer: Send + Sync {
    /// Candidate organization names, in order of appearance.
    fn recognize(&self, text: &str) -> Vec<String>;

    /// Whether this implementation can produce candidates at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Absent capability: recognizes nothing, reports itself unavailable.
pub struct NoopRecognizer;

impl OrgRecognizer for NoopRecognizer {
    fn recognize(&self, _text: &str) -> Vec<String> {
        Vec::new()
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Words that start sentences or boilerplate and therefore produce
/// capitalized tokens that are not organizations.
const SPAN_STOP_WORDS: &[&str] = &[
    "thank", "thanks", "application", "received", "your", "for", "applying",
    "to", "the", "dear", "hello", "hi", "we", "our", "you", "please", "this",
    "interview", "position", "role", "job", "update", "regarding", "greetings",
    "next", "steps",
];

/// Heuristic recognizer: scans for runs of capitalized tokens, preferring
/// two-word spans, skipping sentence-starter stop words.
pub struct CapitalizedSpanRecognizer {
    max_chars: usize,
}

impl CapitalizedSpanRecognizer {
    pub fn new(max_chars: usize) -> Self {
        CapitalizedSpanRecognizer { max_chars }
    }
}

impl Default for CapitalizedSpanRecognizer {
    fn default() -> Self {
        CapitalizedSpanRecognizer::new(200)
    }
}

fn is_candidate_token(token: &str) -> bool {
    let cleaned = token.trim_matches(|c: char| !c.is_alphanumeric());
    cleaned.chars().count() > 2
        && cleaned.chars().next().is_some_and(|c| c.is_uppercase())
        && !SPAN_STOP_WORDS.contains(&cleaned.to_lowercase().as_str())
}

impl OrgRecognizer for CapitalizedSpanRecognizer {
    fn recognize(&self, text: &str) -> Vec<String> {
        let bounded = truncate_chars(text, self.max_chars);
        let tokens: Vec<&str> = bounded.split_whitespace().collect();

        let mut candidates = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if !is_candidate_token(tokens[i]) {
                i += 1;
                continue;
            }
            let first = tokens[i].trim_matches(|c: char| !c.is_alphanumeric());
            if i + 1 < tokens.len() && is_candidate_token(tokens[i + 1]) {
                let second = tokens[i + 1].trim_matches(|c: char| !c.is_alphanumeric());
                candidates.push(format!("{} {}", first, second));
                i += 2;
            } else {
                candidates.push(first.to_string());
                i += 1;
            }
        }
        candidates
    }
}

/// Build the recognizer for a run. Absence is decided once here and logged
/// once, not re-checked per record.
pub fn load_recognizer(enabled: bool, body_prefix_chars: usize) -> Box<dyn OrgRecognizer> {
    if enabled {
        log::info!("organization-entity fallback enabled (capitalized-span heuristic)");
        Box::new(CapitalizedSpanRecognizer::new(body_prefix_chars.max(100)))
    } else {
        log::info!("organization-entity fallback unavailable; extraction cascade only");
        Box::new(NoopRecognizer)
    }
}
