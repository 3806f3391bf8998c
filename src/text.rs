//! Shared text helpers: title-casing, subject normalization, truncation.

use std::sync::LazyLock;

use regex::Regex;

static RE_REPLY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(re|fwd|fw):\s*").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_DASH_TRAILER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*--\s*.*$").unwrap());
static RE_PIPE_TRAILER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\|\s*.*$").unwrap());

/// Title-case a company name. Short all-caps strings (2–5 letters) are
/// treated as acronyms and kept as-is.
pub fn title_case_company(name: &str) -> String {
    let trimmed = name.trim();
    if (2..=5).contains(&trimmed.chars().count())
        && trimmed.chars().all(|c| c.is_ascii_uppercase())
    {
        return trimmed.to_string();
    }

    trimmed
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

/// Normalize a subject line for thread matching: strip a leading
/// reply/forward prefix, collapse whitespace, cut signature/footer
/// trailers after `--` or `|`, lowercase.
pub fn normalize_subject(subject: &str) -> String {
    let stripped = RE_REPLY_PREFIX.replace(subject.trim(), "");
    let collapsed = RE_WHITESPACE.replace_all(stripped.trim(), " ");
    let no_dash = RE_DASH_TRAILER.replace(&collapsed, "");
    let no_pipe = RE_PIPE_TRAILER.replace(&no_dash, "");
    no_pipe.trim().to_lowercase()
}

/// First `max` characters of a string, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
