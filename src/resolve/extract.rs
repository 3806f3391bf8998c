//! Pattern extraction cascade: ordered regex rule families that pull a
//! candidate organization name out of subject/body text.
//!
//! The rule order is load-bearing. A looser family evaluated earlier would
//! steal matches from a more precise later one, so the families form a
//! fixed chain evaluated by first validated success:
//!
//! 1. thank-you / interest-in / applying-to anchors
//! 2. "position at COMPANY" and "COMPANY position" phrasing
//! 3. leading "Company - Job Title" dash format
//! 4. "from COMPANY" and "COMPANY team/recruiting" phrasing
//!
//! A sender-domain derivation and the optional entity recognizer run after
//! the cascade, in `resolve::Resolver`.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::PipelineConfig;
use crate::text::title_case_company;

use super::validate::is_valid_candidate;

/// One rule family: a name for audit logs plus its patterns, tried in order.
struct RuleFamily {
    name: &'static str,
    patterns: Vec<Regex>,
}

static RULE_FAMILIES: LazyLock<Vec<RuleFamily>> = LazyLock::new(|| {
    vec![
        RuleFamily {
            name: "anchor_phrase",
            patterns: vec![
                Regex::new(
                    r"(?i)(?:thank you for your interest in|interest in)\s+([^,\n!.]+?)(?:\s*[,!.]\s*|$)",
                )
                .unwrap(),
                Regex::new(
                    r"(?i)(?:thank you for applying to|applying to)\s+([^,\n!.]+?)(?:\s*[,!.]\s*|$)",
                )
                .unwrap(),
                Regex::new(
                    r"(?i)(?:your application to|application to)\s+([^,\n!.]+?)(?:\s*[,!.]\s*|$)",
                )
                .unwrap(),
                Regex::new(
                    r"(?i)(?:regarding your|your)\s+([A-Z][a-zA-Z\s&,.]+?)\s+(?:employment\s+)?application",
                )
                .unwrap(),
            ],
        },
        RuleFamily {
            name: "position_phrase",
            patterns: vec![
                Regex::new(
                    r"(?i)(?:position|role|opportunity|job)\s+(?:at|with|for)\s+([A-Z][a-zA-Z\s&,.]+?)(?:\s|$|[,.])",
                )
                .unwrap(),
                Regex::new(r"(?i)([A-Z][a-zA-Z\s&,.]+?)\s+(?:position|role|opportunity|job|interview)")
                    .unwrap(),
                Regex::new(r"(?i)(?:@|at)\s+([A-Z][a-zA-Z\s&,.]+?)(?:\s|$|[,.])").unwrap(),
            ],
        },
        RuleFamily {
            name: "dash_format",
            // Case-sensitive on purpose: only a capitalized leading token
            // looks like "Company - Job Title".
            patterns: vec![Regex::new(r"^([A-Z][a-zA-Z\s&,.]+?)\s*[-\u{2013}\u{2014}]\s*").unwrap()],
        },
        RuleFamily {
            name: "from_phrase",
            patterns: vec![
                Regex::new(r"(?i)(?:from|by)\s+([A-Z][a-zA-Z\s&,.]+?)(?:\s|$|[,.])").unwrap(),
                Regex::new(r"(?i)^([A-Z][a-zA-Z\s&,.]+?)\s+(?:team|recruiting|talent|hiring)")
                    .unwrap(),
            ],
        },
    ]
});

static RE_ENTITY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(inc|llc|corp|corporation|company|co\.?)\s*$").unwrap());

/// Strip a trailing corporate-entity suffix (Inc, LLC, Corp, ...).
pub fn strip_entity_suffix(name: &str) -> String {
    RE_ENTITY_SUFFIX.replace(name.trim(), "").trim().to_string()
}

/// Run the cascade over one text. Returns the first validated, title-cased
/// capture, or `None` when every family misses.
pub fn extract_from_text(text: &str, config: &PipelineConfig) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    for family in RULE_FAMILIES.iter() {
        for pattern in &family.patterns {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let Some(capture) = captures.get(1) else {
                continue;
            };
            let candidate = strip_entity_suffix(capture.as_str());
            if is_valid_candidate(&candidate, &config.subject_validation, config) {
                log::debug!("extracted '{}' via rule family {}", candidate, family.name);
                return Some(title_case_company(&candidate));
            }
        }
    }
    None
}

/// Run the cascade over subject first, then the bounded body excerpt.
pub fn extract_company(subject: &str, body_prefix: &str, config: &PipelineConfig) -> Option<String> {
    extract_from_text(subject, config).or_else(|| extract_from_text(body_prefix, config))
}

// ---------------------------------------------------------------------------
// Sender-domain derivation
// ---------------------------------------------------------------------------

/// Applicant-tracking-system domains: mail from these says nothing about
/// the hiring company, so the domain is never used as a candidate.
const ATS_DOMAINS: &[&str] = &[
    "greenhouse-mail.io",
    "lever.co",
    "workday.com",
    "icims.com",
    "bamboohr.com",
];

/// Domain labels that are mail infrastructure rather than a company.
const GENERIC_DOMAIN_LABELS: &[&str] = &[
    "no-reply", "noreply", "mail", "email", "info", "contact", "support",
];

/// Derive a candidate from a sender domain's first label, unless the domain
/// belongs to an ATS platform or is generic mail plumbing.
pub fn company_from_sender_domain(domain: &str) -> Option<String> {
    let lower = domain.trim().to_lowercase();
    if lower.is_empty() || ATS_DOMAINS.iter().any(|ats| lower.contains(ats)) {
        return None;
    }

    let mut labels = lower.split('.');
    let first = labels.next()?;
    labels.next()?; // require at least a second label
    if first.is_empty() || GENERIC_DOMAIN_LABELS.contains(&first) {
        return None;
    }
    Some(title_case_company(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_anchor_phrase_beats_later_rules() {
        // Rule ordering: the anchor-phrase family must win and the trailing
        // "Corp" suffix must be stripped before validation.
        let result = extract_from_text(
            "Thank you for your interest in Acme Corp, regarding the Analyst role",
            &config(),
        );
        assert_eq!(result.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_applying_to_anchor() {
        let result = extract_from_text("Thank you for applying to Stripe!", &config());
        assert_eq!(result.as_deref(), Some("Stripe"));
    }

    #[test]
    fn test_position_at_phrase() {
        let result = extract_from_text("Software Engineer position at Datadog", &config());
        assert_eq!(result.as_deref(), Some("Datadog"));
    }

    #[test]
    fn test_dash_format() {
        let result = extract_from_text("Twilio - Senior Platform Engineer", &config());
        assert_eq!(result.as_deref(), Some("Twilio"));
    }

    #[test]
    fn test_team_phrase() {
        let result = extract_from_text("Figma Recruiting has an update", &config());
        assert_eq!(result.as_deref(), Some("Figma"));
    }

    #[test]
    fn test_invalid_captures_fall_through() {
        // "your" and bare job vocabulary never validate
        assert_eq!(extract_from_text("Thank you for your interest in your!", &config()), None);
        assert_eq!(extract_from_text("", &config()), None);
    }

    #[test]
    fn test_body_is_secondary() {
        let result = extract_company(
            "Quick update",
            "Thank you for applying to Vercel.",
            &config(),
        );
        assert_eq!(result.as_deref(), Some("Vercel"));
    }

    #[test]
    fn test_subject_wins_over_body() {
        let result = extract_company(
            "Thank you for applying to Stripe!",
            "Thank you for applying to Vercel.",
            &config(),
        );
        assert_eq!(result.as_deref(), Some("Stripe"));
    }

    #[test]
    fn test_domain_derivation() {
        assert_eq!(company_from_sender_domain("stripe.com").as_deref(), Some("Stripe"));
        assert_eq!(
            company_from_sender_domain("pyramidci.com").as_deref(),
            Some("Pyramidci")
        );
    }

    #[test]
    fn test_domain_derivation_skips_ats_and_generic() {
        assert_eq!(company_from_sender_domain("us.greenhouse-mail.io"), None);
        assert_eq!(company_from_sender_domain("hire.lever.co"), None);
        assert_eq!(company_from_sender_domain("mail.example.com"), None);
        assert_eq!(company_from_sender_domain("noreply.example.com"), None);
        assert_eq!(company_from_sender_domain(""), None);
        assert_eq!(company_from_sender_domain("localhost"), None);
    }

    #[test]
    fn test_strip_entity_suffix() {
        assert_eq!(strip_entity_suffix("Acme Corp"), "Acme");
        assert_eq!(strip_entity_suffix("Initech LLC"), "Initech");
        assert_eq!(strip_entity_suffix("Wayne Co."), "Wayne");
        assert_eq!(strip_entity_suffix("Cisco"), "Cisco");
    }
}
