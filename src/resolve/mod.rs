//! Company resolution: turns one noisy `EmailRecord` into a
//! `ResolvedRecord` with a validated organization name.
//!
//! Candidate sources form a confidence cascade. A supplied name that
//! survives scrubbing and the artifact filter is kept — a known-good
//! company never regresses to unknown. Only records without a usable
//! supplied name go through pattern extraction, sender-domain derivation,
//! and the optional entity fallback. Every accepted candidate, regardless
//! of source, passes the platform normalizer and the validator.

pub mod artifacts;
pub mod entity;
pub mod extract;
pub mod platform;
pub mod validate;

use crate::config::PipelineConfig;
use crate::model::{EmailRecord, ResolvedRecord, UNKNOWN_COMPANY};
use crate::text::truncate_chars;

use artifacts::{is_artifact, NameScrubber};
use entity::OrgRecognizer;
use validate::is_valid_candidate;

/// Which stage produced a candidate. Each source carries an implied
/// confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Upstream-supplied name that survived scrubbing and filtering.
    Supplied,
    /// Sender-domain label of a non-ATS domain.
    SenderDomain,
    /// Pattern extraction cascade over subject/body.
    Pattern,
    /// General-purpose entity recognizer.
    EntityFallback,
}

impl CandidateSource {
    pub fn confidence(self) -> u8 {
        match self {
            CandidateSource::Supplied => 75,
            CandidateSource::SenderDomain => 70,
            CandidateSource::Pattern => 65,
            CandidateSource::EntityFallback => 55,
        }
    }
}

/// A proposed organization name. Transient: exists only while one record
/// is being resolved.
#[derive(Debug, Clone)]
pub struct CompanyCandidate {
    pub name: String,
    pub source: CandidateSource,
}

/// Per-batch resolver. Holds the compiled scrubber and the injected
/// recognizer for the lifetime of one run.
pub struct Resolver<'a> {
    config: &'a PipelineConfig,
    recognizer: &'a dyn OrgRecognizer,
    scrubber: NameScrubber,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a PipelineConfig, recognizer: &'a dyn OrgRecognizer) -> Self {
        Resolver {
            config,
            recognizer,
            scrubber: NameScrubber::new(config),
        }
    }

    /// Resolve one record. Never fails: an extraction miss degrades to the
    /// unknown-company sentinel.
    pub fn resolve(&self, email: EmailRecord) -> ResolvedRecord {
        let supplied = email.company_name.clone().unwrap_or_default();

        match self.best_candidate(&email, &supplied) {
            Some((name, source)) => {
                let changed = name != supplied.trim();
                ResolvedRecord {
                    email,
                    company_name: name,
                    company_confidence: source.confidence(),
                    company_before_cleanup: if changed && !supplied.is_empty() {
                        Some(supplied)
                    } else {
                        None
                    },
                }
            }
            None => ResolvedRecord {
                email,
                company_name: UNKNOWN_COMPANY.to_string(),
                company_confidence: 0,
                company_before_cleanup: if supplied.is_empty() {
                    None
                } else {
                    Some(supplied)
                },
            },
        }
    }

    fn best_candidate(&self, email: &EmailRecord, supplied: &str) -> Option<(String, CandidateSource)> {
        for candidate in self.candidates(email, supplied) {
            if let Some(name) = self.accept(&candidate) {
                return Some((name, candidate.source));
            }
        }
        None
    }

    /// Candidate sources in priority order. Lazily evaluated would be
    /// nicer but the per-record cost here is a few regex scans.
    fn candidates(&self, email: &EmailRecord, supplied: &str) -> Vec<CompanyCandidate> {
        let mut out = Vec::new();

        let scrubbed = self.scrubber.scrub(supplied);
        if !scrubbed.is_empty() && !is_artifact(&scrubbed, self.config) {
            out.push(CompanyCandidate {
                name: scrubbed,
                source: CandidateSource::Supplied,
            });
        }

        let body_prefix = truncate_chars(&email.body_preview, self.config.body_prefix_chars);
        if let Some(name) = extract::extract_company(&email.subject_line, body_prefix, self.config)
        {
            out.push(CompanyCandidate {
                name,
                source: CandidateSource::Pattern,
            });
        }

        if let Some(name) = extract::company_from_sender_domain(&email.sender_domain) {
            out.push(CompanyCandidate {
                name,
                source: CandidateSource::SenderDomain,
            });
        }

        if self.recognizer.is_available() {
            let text = format!("{} {}", email.subject_line, body_prefix);
            for name in self.recognizer.recognize(&text) {
                out.push(CompanyCandidate {
                    name,
                    source: CandidateSource::EntityFallback,
                });
            }
        }

        out
    }

    /// Shared acceptance path: platform normalization, artifact filter,
    /// validator. Applies to every candidate regardless of source.
    fn accept(&self, candidate: &CompanyCandidate) -> Option<String> {
        let normalized = platform::normalize(&candidate.name)?;
        if is_artifact(&normalized, self.config) {
            return None;
        }
        let limits = match candidate.source {
            CandidateSource::Pattern => &self.config.subject_validation,
            _ => &self.config.general_validation,
        };
        if !is_valid_candidate(&normalized, limits, self.config) {
            return None;
        }
        Some(normalized)
    }
}
