//! Artifact filter: rejects text that is obviously not an organization name.
//!
//! Two jobs: the hard gate (`is_artifact`) that every candidate passes
//! regardless of which stage produced it, and the softer scrub
//! (`NameScrubber`) that removes greeting/boilerplate fragments from
//! upstream-supplied names before they are judged.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::PipelineConfig;

/// Strings that are never company names: platform tokens, no-reply
/// variants, greetings, markup fragments, generic job vocabulary.
/// The mailbox owner's own name is appended from config at runtime.
const WRONG_COMPANY_TERMS: &[&str] = &[
    // Email platforms
    "email",
    "emails",
    "gmail",
    "outlook",
    "yahoo",
    // No-reply variants
    "noreply",
    "no-reply",
    "donotreply",
    "do-not-reply",
    // Generic applicant terms
    "candidates",
    "candidate",
    "applicant",
    "applicants",
    // Greetings
    "dear",
    "hello",
    "hi",
    "thanks",
    "thank",
    "notification",
    // Generic HR roles
    "team",
    "recruiting",
    "talent",
    "hr",
    "human resources",
    // Markup fragments
    "divthank",
    "div",
    "span",
    "img",
    "src",
    "schemas-microsoft-com",
    "xmlns",
    "http",
    "www",
    // ATS boilerplate
    "tion powered by icims, the",
    "powered by",
    "icims",
    // Job-posting vocabulary
    "application",
    "apply",
    "job",
    "position",
    "role",
    // Email types
    "update",
    "reminder",
    "confirmation",
    "receipt",
];

static RE_REPLY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(re|fw|fwd):\s*").unwrap());
static RE_ALL_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static RE_NO_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^a-zA-Z]*$").unwrap());

/// True when the candidate is obviously not an organization name.
///
/// A blocklist term disqualifies the candidate when it matches exactly or
/// when it is substantially contained in it — the term covering more than
/// `blocklist_overlap_ratio` of the candidate's length.
pub fn is_artifact(candidate: &str, config: &PipelineConfig) -> bool {
    let lower = candidate.trim().to_lowercase();
    if lower.is_empty() {
        return true;
    }

    let user_terms = config.user_name_terms();
    let blocked = user_terms
        .iter()
        .map(|s| s.as_str())
        .chain(WRONG_COMPANY_TERMS.iter().copied());
    for term in blocked {
        if lower == term {
            return true;
        }
        if lower.contains(term)
            && term.len() as f64 > lower.len() as f64 * config.blocklist_overlap_ratio
        {
            return true;
        }
    }

    // Structural junk: reply prefixes, bare numbers, letterless strings
    // (which also covers all-whitespace).
    RE_REPLY_PREFIX.is_match(&lower)
        || RE_ALL_DIGITS.is_match(&lower)
        || RE_NO_LETTERS.is_match(&lower)
}

/// Removes known boilerplate fragments from an upstream-supplied company
/// name: greetings addressed to the mailbox owner, "logo"/"notification"
/// trailers, leading articles, trailing corporate-entity suffixes.
pub struct NameScrubber {
    full_pass: Vec<Regex>,
    light_pass: Vec<Regex>,
}

impl NameScrubber {
    pub fn new(config: &PipelineConfig) -> Self {
        let mut full = Vec::new();
        let mut light = Vec::new();

        if let Some(first) = config.user_first_name() {
            let name = regex::escape(&first);
            let greeting = Regex::new(&format!(r"(?i)\s*(logo|hi|dear|hello)\s+{name}\s*")).unwrap();
            let trailing = Regex::new(&format!(r"(?i)\s*{name}\s*$")).unwrap();
            full.push(greeting.clone());
            full.push(trailing.clone());
            light.push(greeting);
            light.push(trailing);
        }

        let logo_trailer = Regex::new(r"(?i)\s*logo\s*$").unwrap();
        light.push(logo_trailer.clone());
        full.push(logo_trailer);
        full.push(Regex::new(r"(?i)\s*notification\s*$").unwrap());
        full.push(Regex::new(r"(?i)^\s*(gdpr|thank|thanks|update)\s+").unwrap());
        full.push(Regex::new(r"(?i)\s*team\s*$").unwrap());
        full.push(Regex::new(r"(?i)\s*recruiting\s*$").unwrap());
        full.push(Regex::new(r"(?i)^\s*(the|a|an)\s+").unwrap());
        full.push(Regex::new(r"(?i)\s+(inc|llc|corp|corporation|company|co)\s*$").unwrap());

        NameScrubber {
            full_pass: full,
            light_pass: light,
        }
    }

    /// Scrub a supplied name. When the full pass strips the string below
    /// two characters, retry with only the greeting/name removals so a
    /// short legitimate name is not destroyed. Returns "" when nothing
    /// usable remains.
    pub fn scrub(&self, name: &str) -> String {
        let original = name.trim();
        if original.is_empty() {
            return String::new();
        }

        let mut scrubbed = original.to_string();
        for re in &self.full_pass {
            scrubbed = re.replace_all(&scrubbed, "").trim().to_string();
        }

        if scrubbed.chars().count() < 2 {
            scrubbed = original.to_string();
            for re in &self.light_pass {
                scrubbed = re.replace_all(&scrubbed, "").trim().to_string();
            }
        }

        if scrubbed.chars().count() < 2 {
            String::new()
        } else {
            scrubbed
        }
    }
}
