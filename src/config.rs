//! Pipeline configuration: the tunable thresholds the heuristics depend on.
//!
//! The similarity and overlap cutoffs started life as magic numbers in the
//! source dataset cleanup; they are exposed here as named fields so they can
//! be tuned per mailbox instead of being hard-baked.

use serde::{Deserialize, Serialize};

/// Length/character admissibility limits for one validator caller context.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub min_len: usize,
    pub max_len: usize,
    /// Minimum share of alphabetic characters, 0.0–1.0.
    pub min_alpha_ratio: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            min_len: 2,
            max_len: 50,
            min_alpha_ratio: 0.6,
        }
    }
}

impl ValidationLimits {
    /// Looser limits used when validating subject-line extractions.
    pub fn subject() -> Self {
        ValidationLimits {
            min_len: 2,
            max_len: 60,
            min_alpha_ratio: 0.5,
        }
    }

    /// Tighter limits used for supplied names and non-pattern candidates.
    pub fn general() -> Self {
        ValidationLimits::default()
    }
}

/// Batch-wide configuration, serde-loadable from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// The mailbox owner's full name. Greeting fragments addressed to this
    /// person are artifacts, never company names. Empty disables the check.
    pub user_full_name: String,
    /// Normalized-subject similarity needed to join an existing thread.
    pub subject_similarity_threshold: f64,
    /// Blocklist containment ratio above which a candidate is an artifact.
    pub blocklist_overlap_ratio: f64,
    /// Validator limits for subject-line pattern extractions.
    pub subject_validation: ValidationLimits,
    /// Validator limits for supplied names, domain and entity candidates.
    pub general_validation: ValidationLimits,
    /// How many body-excerpt characters extraction and fallback may read.
    pub body_prefix_chars: usize,
    /// Whether the optional organization-entity recognizer is wanted.
    pub entity_fallback: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            user_full_name: String::new(),
            subject_similarity_threshold: 0.8,
            blocklist_overlap_ratio: 0.6,
            subject_validation: ValidationLimits::subject(),
            general_validation: ValidationLimits::general(),
            body_prefix_chars: 100,
            entity_fallback: true,
        }
    }
}

impl PipelineConfig {
    /// Lower-cased name fragments belonging to the mailbox owner:
    /// full name plus each individual part.
    pub fn user_name_terms(&self) -> Vec<String> {
        let full = self.user_full_name.trim().to_lowercase();
        if full.is_empty() {
            return Vec::new();
        }
        let mut terms = vec![full.clone()];
        for part in full.split_whitespace() {
            if part.len() >= 2 && !terms.iter().any(|t| t == part) {
                terms.push(part.to_string());
            }
        }
        terms
    }

    /// The owner's lower-cased first name, if configured.
    pub fn user_first_name(&self) -> Option<String> {
        self.user_full_name
            .split_whitespace()
            .next()
            .map(|s| s.to_lowercase())
    }
}
