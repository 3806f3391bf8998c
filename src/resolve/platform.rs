//! Platform artifact normalizer: fixes known deterministic distortions
//! introduced by sending platforms and applicant-tracking systems.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::title_case_company;

/// Known mis-extractions keyed by substring. Iteration order is fixed and
/// first match wins: "ziprecruiter phil" must be tried before the plain
/// "ziprecruiter" key it contains. An empty replacement means "discard".
const PLATFORM_FIXES: &[(&str, &str)] = &[
    ("schemas-microsoft-com", "Microsoft"),
    ("ziprecruiter phil", "ZipRecruiter"),
    ("ziprecruiter", "ZipRecruiter"),
    ("applytojob", "ApplyToJob"),
    ("ashbyhq", "Ashby"),
    ("marriotthiring", "Marriott"),
    ("pyramidci", "Pyramid Consulting"),
    ("hiretalent", "HireTalent"),
    ("cdi-careers", "CDI"),
    ("divthank", ""),
];

/// Trailing platform-suffix tokens stripped after the dictionary pass.
static PLATFORM_SUFFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\s+phil$",
        r"(?i)\s+hiring$",
        r"(?i)\s+careers?$",
        r"(?i)\s+jobs?$",
        r"(?i)\s+talent$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Normalize a candidate against the known platform distortions.
/// Returns `None` when the candidate maps to "discard" or normalizes to
/// nothing.
pub fn normalize(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    for (artifact, replacement) in PLATFORM_FIXES {
        if lower.contains(artifact) {
            if replacement.is_empty() {
                return None;
            }
            return Some((*replacement).to_string());
        }
    }

    let mut cleaned = trimmed.to_string();
    for suffix in PLATFORM_SUFFIXES.iter() {
        cleaned = suffix.replace(&cleaned, "").to_string();
    }

    let titled = title_case_company(&cleaned);
    if titled.is_empty() {
        None
    } else {
        Some(titled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_fixes() {
        assert_eq!(normalize("schemas-microsoft-com").as_deref(), Some("Microsoft"));
        assert_eq!(normalize("Pyramidci").as_deref(), Some("Pyramid Consulting"));
        assert_eq!(normalize("ashbyhq careers").as_deref(), Some("Ashby"));
    }

    #[test]
    fn test_fix_order_longest_key_first() {
        // "ziprecruiter phil" must hit its own entry, not the bare key —
        // both map to the same value, so the ordering shows in the table,
        // and a candidate containing the longer key resolves in one step.
        assert_eq!(normalize("ZipRecruiter Phil").as_deref(), Some("ZipRecruiter"));
        assert_eq!(normalize("ziprecruiter").as_deref(), Some("ZipRecruiter"));
    }

    #[test]
    fn test_discard_mapping() {
        assert_eq!(normalize("divthank"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn test_suffix_stripping() {
        assert_eq!(normalize("Acme Hiring").as_deref(), Some("Acme"));
        assert_eq!(normalize("Acme Careers").as_deref(), Some("Acme"));
        assert_eq!(normalize("Acme Career").as_deref(), Some("Acme"));
        assert_eq!(normalize("Acme Jobs").as_deref(), Some("Acme"));
        assert_eq!(normalize("Acme Talent").as_deref(), Some("Acme"));
        assert_eq!(normalize("acme phil").as_deref(), Some("Acme"));
    }

    #[test]
    fn test_title_cases_untouched_names() {
        assert_eq!(normalize("acme analytics").as_deref(), Some("Acme Analytics"));
        assert_eq!(normalize("IBM").as_deref(), Some("IBM"));
    }
}
