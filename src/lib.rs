//! jobtrail: heuristic company resolution, thread consolidation, and
//! pipeline triage over job-application email exports.
//!
//! The batch flow is a fixed sequence of immutable transformations:
//! `EmailRecord` → resolution (`resolve`) → `ResolvedRecord` → thread
//! consolidation (`threads`) → `ConsolidatedRecord` → classification and
//! scoring (`classify`, `score`) → `PipelineRecord`, then a read-only
//! aggregation pass (`metrics`). Per-record failures degrade to explicit
//! absent markers or sentinels and never abort the batch.

pub mod classify;
pub mod config;
pub mod dates;
pub mod error;
pub mod io;
pub mod metrics;
pub mod model;
pub mod resolve;
pub mod score;
pub mod text;
pub mod threads;

use chrono::NaiveDateTime;
use serde::Serialize;

use config::PipelineConfig;
use dates::EmailDate;
use metrics::{ActivityMetrics, ConversionMetrics, SummaryStats};
use model::{ConsolidatedRecord, EmailRecord, PipelineRecord, UNKNOWN_COMPANY};
use resolve::entity::OrgRecognizer;
use resolve::Resolver;
use score::ScoreInputs;

/// Whole-batch aggregates, serializable as the run summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMetrics {
    pub summary: SummaryStats,
    pub conversion: ConversionMetrics,
    /// Absent when no record in the batch carries a parseable date.
    pub activity: Option<ActivityMetrics>,
}

/// Result of one batch run: the scored records plus their aggregates.
pub struct BatchOutput {
    pub records: Vec<PipelineRecord>,
    pub metrics: BatchMetrics,
}

/// Run the whole pipeline over one batch of ingested records.
pub fn run_batch(
    records: Vec<EmailRecord>,
    config: &PipelineConfig,
    recognizer: &dyn OrgRecognizer,
    reference: NaiveDateTime,
) -> BatchOutput {
    let total = records.len();
    let resolver = Resolver::new(config, recognizer);
    let resolved: Vec<_> = records.into_iter().map(|r| resolver.resolve(r)).collect();

    let unresolved = resolved
        .iter()
        .filter(|r| r.company_name == UNKNOWN_COMPANY)
        .count();
    log::info!(
        "resolved companies for {}/{} records",
        total - unresolved,
        total
    );

    let consolidated = threads::consolidate(resolved, config);
    let scored: Vec<PipelineRecord> = consolidated
        .into_iter()
        .map(|record| derive_pipeline_fields(record, reference))
        .collect();

    let batch_metrics = BatchMetrics {
        summary: metrics::summary_stats(&scored),
        conversion: metrics::conversion_metrics(&scored),
        activity: metrics::activity_metrics(&scored),
    };

    BatchOutput {
        records: scored,
        metrics: batch_metrics,
    }
}

/// Classification and scoring for one consolidated record. Pure per
/// record: the stage is order-independent across the batch.
fn derive_pipeline_fields(
    consolidated: ConsolidatedRecord,
    reference: NaiveDateTime,
) -> PipelineRecord {
    let status = consolidated.record.email.status;

    // Last contact prefers the thread's newest member date over the
    // representative's own.
    let last_contact = consolidated
        .last_email_date
        .as_deref()
        .or(consolidated.record.email.email_date.as_deref());
    let contact_date = EmailDate::parse(last_contact);
    let days_since_contact = classify::days_since_contact(&contact_date, reference);

    let pipeline_status = classify::classify_pipeline(status, days_since_contact);
    let response_type = classify::classify_response(consolidated.thread_email_count, status);
    let opportunity_type = classify::classify_opportunity(&consolidated.record.email);

    let priority_score = score::priority_score(&ScoreInputs {
        status,
        status_confidence: consolidated.status_confidence,
        days_since_contact,
        company_known: consolidated.record.company_name != UNKNOWN_COMPANY,
        role_title: consolidated.record.email.role_title.as_deref(),
        thread_email_count: consolidated.thread_email_count,
    });
    let priority_level = score::priority_level(priority_score);
    let recommended_action = score::recommended_action(pipeline_status, status).to_string();

    PipelineRecord {
        record: consolidated,
        pipeline_status,
        days_since_contact,
        priority_score,
        priority_level,
        recommended_action,
        response_type,
        opportunity_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::model::{PipelineStatus, PriorityLevel, Status};
    use crate::resolve::entity::NoopRecognizer;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 13)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn email(
        subject: &str,
        company: Option<&str>,
        status: Status,
        date: Option<&str>,
    ) -> EmailRecord {
        EmailRecord {
            sender_email: "noreply@example.com".to_string(),
            subject_line: subject.to_string(),
            status,
            status_confidence: Some(85),
            company_name: company.map(str::to_string),
            email_date: date.map(str::to_string),
            ..EmailRecord::default()
        }
    }

    #[test]
    fn test_end_to_end_batch() {
        let config = PipelineConfig::default();
        let records = vec![
            email(
                "Interview with Acme",
                Some("Acme"),
                Status::InterviewScheduled,
                Some("2025-06-10"),
            ),
            email(
                "RE: Interview with Acme",
                Some("Acme"),
                Status::InterviewScheduled,
                Some("2025-06-12"),
            ),
            email(
                "Thank you for applying to Stripe!",
                None,
                Status::Applied,
                Some("2025-05-01"),
            ),
            email("hello there", None, Status::Unknown, None),
        ];

        let output = run_batch(records, &config, &NoopRecognizer, reference());

        // Two interview emails merged, the rest pass through
        assert_eq!(output.records.len(), 3);

        let thread = output
            .records
            .iter()
            .find(|r| r.record.thread_id.is_some())
            .unwrap();
        assert_eq!(thread.record.thread_email_count, 2);
        assert_eq!(thread.record.record.company_name, "Acme");
        // Newest member date drives recency: 1 day before the reference
        assert_eq!(thread.days_since_contact, Some(1));
        assert_eq!(thread.pipeline_status, PipelineStatus::Hot);
        assert_eq!(thread.recommended_action, "Prepare for interview");
        assert_eq!(thread.priority_level, PriorityLevel::Critical);

        let stale = output
            .records
            .iter()
            .find(|r| r.record.record.company_name == "Stripe")
            .unwrap();
        assert_eq!(stale.pipeline_status, PipelineStatus::Ghosted);

        let unknown = output
            .records
            .iter()
            .find(|r| r.record.record.company_name == UNKNOWN_COMPANY)
            .unwrap();
        assert_eq!(unknown.pipeline_status, PipelineStatus::UnknownTimeline);
        assert_eq!(unknown.days_since_contact, None);

        assert_eq!(output.metrics.summary.total_records, 3);
        assert_eq!(output.metrics.summary.companies_engaged, 2);
        assert_eq!(output.metrics.conversion.total_interviews, 1);
        assert!(output.metrics.activity.is_some());
    }

    #[test]
    fn test_batch_empty_input() {
        let config = PipelineConfig::default();
        let output = run_batch(Vec::new(), &config, &NoopRecognizer, reference());
        assert!(output.records.is_empty());
        assert_eq!(output.metrics.summary.total_records, 0);
        assert!(output.metrics.activity.is_none());
    }
}
